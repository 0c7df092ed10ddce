use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDefinition {
    pub id: i64,
    pub name: String,
    pub cron_expression: String,
    pub app_name: String,
    pub action_name: String,
    pub enabled: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRun {
    pub id: i64,
    pub task_name: String,
    pub start_time: i64,
    pub duration_ms: i64,
    pub success: bool,
    pub message: Option<String>,
}
