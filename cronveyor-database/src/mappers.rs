use chrono::{DateTime, Utc};
use cronveyor_models::core::{TaskDefinition, TaskRun};
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub fn sqlite_row_to_task_definition(row: &SqliteRow) -> TaskDefinition {
    TaskDefinition {
        id: row.get::<i64, _>("id"),
        name: row.get::<String, _>("name"),
        cron_expression: row.get::<String, _>("cron_expression"),
        app_name: row.get::<String, _>("app_name"),
        action_name: row.get::<String, _>("action_name"),
        enabled: row.get::<bool, _>("enabled"),
        created_at: row
            .get::<Option<i64>, _>("created_at")
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        updated_at: row
            .get::<Option<i64>, _>("updated_at")
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    }
}

pub fn sqlite_row_to_task_run(row: &SqliteRow) -> TaskRun {
    TaskRun {
        id: row.get::<i64, _>("id"),
        task_name: row.get::<String, _>("task_name"),
        start_time: row.get::<i64, _>("start_time"),
        duration_ms: row.get::<i64, _>("duration_ms"),
        success: row.get::<bool, _>("success"),
        message: row.get::<Option<String>, _>("message"),
    }
}

pub fn pg_row_to_task_definition(row: &PgRow) -> TaskDefinition {
    TaskDefinition {
        id: row.get::<i64, _>("id"),
        name: row.get::<String, _>("name"),
        cron_expression: row.get::<String, _>("cron_expression"),
        app_name: row.get::<String, _>("app_name"),
        action_name: row.get::<String, _>("action_name"),
        enabled: row.get::<bool, _>("enabled"),
        created_at: row
            .get::<Option<i64>, _>("created_at")
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        updated_at: row
            .get::<Option<i64>, _>("updated_at")
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    }
}

pub fn pg_row_to_task_run(row: &PgRow) -> TaskRun {
    TaskRun {
        id: row.get::<i64, _>("id"),
        task_name: row.get::<String, _>("task_name"),
        start_time: row.get::<i64, _>("start_time"),
        duration_ms: row.get::<i64, _>("duration_ms"),
        success: row.get::<bool, _>("success"),
        message: row.get::<Option<String>, _>("message"),
    }
}
