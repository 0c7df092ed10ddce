use std::future::Future;

use chrono::{DateTime, Utc};
use cronveyor_models::core::{TaskDefinition, TaskRun};
use cronveyor_models::errors::SendableError;

// NOTE: Ensure anything that implements this trait cannot contain a reference
// otherwise, this is breaking major rules
pub trait TaskSource: Send + Sync + 'static {
    fn create_task_definitions_table(
        &self,
    ) -> impl Future<Output = Result<(), SendableError>> + Send;
    fn create_task_runs_table(&self) -> impl Future<Output = Result<(), SendableError>> + Send;
    fn upsert_task(
        &self,
        task: &TaskDefinition,
    ) -> impl Future<Output = Result<(), SendableError>> + Send;
    fn delete_task(&self, task_id: i64) -> impl Future<Output = Result<(), SendableError>> + Send;
    fn fetch_tasks_by_app(
        &self,
        app_name: &str,
    ) -> impl Future<Output = Result<Vec<TaskDefinition>, SendableError>> + Send;
    fn fetch_task_runs(
        &self,
        start: i64,
        end: i64,
    ) -> impl Future<Output = Result<Vec<TaskRun>, SendableError>> + Send;
    fn log_task_run(
        &self,
        task_name: &str,
        start_time: DateTime<Utc>,
        duration_ms: i64,
        success: bool,
        message: Option<&str>,
    ) -> impl Future<Output = Result<(), SendableError>> + Send;
}
