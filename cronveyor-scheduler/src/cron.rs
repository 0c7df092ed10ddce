use chrono::{DateTime, Utc};
use croner::Cron;

use cronveyor_models::errors::ScheduleError;

// Wraps a parsed 6-field (seconds-first) cron pattern together with its
// source expression so errors can point back at the offending string.
#[derive(Clone, Debug)]
pub struct CronSchedule {
    expression: String,
    cron: Cron,
}

impl CronSchedule {
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let cron = Cron::new(expression)
            .with_seconds_required()
            .parse()
            .map_err(|err| ScheduleError::InvalidExpression {
                expression: expression.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            expression: expression.to_string(),
            cron,
        })
    }

    pub fn next_fire_time(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        self.cron
            .find_next_occurrence(&after, false)
            .map_err(|err| ScheduleError::InvalidExpression {
                expression: self.expression.clone(),
                message: err.to_string(),
            })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_six_field_expressions() {
        let schedule = CronSchedule::parse("0 0/1 * * * ?").unwrap();
        assert_eq!(schedule.expression(), "0 0/1 * * * ?");
    }

    #[test]
    fn rejects_garbage() {
        let err = CronSchedule::parse("every minute or so").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidExpression { .. }));
    }

    #[test]
    fn rejects_five_field_expressions() {
        assert!(CronSchedule::parse("0 * * * *").is_err());
    }

    #[test]
    fn next_fire_is_strictly_after_the_reference() {
        let schedule = CronSchedule::parse("0 0/1 * * * ?").unwrap();
        let on_the_minute = Utc.with_ymd_and_hms(2026, 1, 1, 8, 30, 0).unwrap();

        let next = schedule.next_fire_time(on_the_minute).unwrap();
        assert!(next > on_the_minute);
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 1, 8, 31, 0).unwrap());
    }

    #[test]
    fn next_fire_lands_on_the_matching_instant() {
        let schedule = CronSchedule::parse("0 0/1 * * * ?").unwrap();
        let mid_minute = Utc.with_ymd_and_hms(2026, 1, 1, 8, 30, 30).unwrap();

        let next = schedule.next_fire_time(mid_minute).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 1, 8, 31, 0).unwrap());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let schedule = CronSchedule::parse("30 15 2 * * *").unwrap();
        let reference = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

        let first = schedule.next_fire_time(reference).unwrap();
        let second = schedule.next_fire_time(reference).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, Utc.with_ymd_and_hms(2026, 3, 11, 2, 15, 30).unwrap());
    }

    #[test]
    fn weekday_fields_resolve_to_the_next_matching_day() {
        // 2026-01-01 is a Thursday; next Monday 09:00 is 2026-01-05
        let schedule = CronSchedule::parse("0 0 9 ? * 1").unwrap();
        let thursday = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        let next = schedule.next_fire_time(thursday).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap());
    }

    #[test]
    fn yearly_expressions_roll_over_to_the_next_year() {
        let schedule = CronSchedule::parse("0 30 4 1 1 ?").unwrap();
        let midyear = Utc.with_ymd_and_hms(2026, 6, 15, 0, 0, 0).unwrap();

        let next = schedule.next_fire_time(midyear).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2027, 1, 1, 4, 30, 0).unwrap());
    }
}
