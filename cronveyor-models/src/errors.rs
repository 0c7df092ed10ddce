use std::fmt;

pub type SendableError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug)]
pub enum ScheduleError {
    SourceUnavailable {
        message: String,
    },
    InvalidExpression {
        expression: String,
        message: String,
    },
    ActionNotFound {
        action: String,
    },
    InvocationFailed {
        action: String,
        message: String,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::SourceUnavailable { message } => {
                write!(f, "task source unavailable: {}", message)
            }
            ScheduleError::InvalidExpression {
                expression,
                message,
            } => {
                write!(f, "invalid cron expression `{}`: {}", expression, message)
            }
            ScheduleError::ActionNotFound { action } => {
                write!(f, "no action registered under `{}`", action)
            }
            ScheduleError::InvocationFailed { action, message } => {
                write!(f, "action `{}` failed: {}", action, message)
            }
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
