use std::sync::Arc;

use log::info;

use cronveyor_database::interfaces::TaskSource;
use cronveyor_models::core::TaskDefinition;
use cronveyor_models::errors::ScheduleError;

// Startup snapshot of the definitions owned by this application. Disabled
// definitions stay in the snapshot; the dispatcher needs them to report
// found-vs-scheduled counts.
#[derive(Debug)]
pub struct TaskRegistry {
    definitions: Vec<TaskDefinition>,
}

impl TaskRegistry {
    pub async fn load<S: TaskSource>(
        source: &Arc<S>,
        app_name: &str,
    ) -> Result<Self, ScheduleError> {
        let definitions = source.fetch_tasks_by_app(app_name).await.map_err(|err| {
            ScheduleError::SourceUnavailable {
                message: err.to_string(),
            }
        })?;
        info!(
            "Task registry loaded {} definition(s) for `{}`",
            definitions.len(),
            app_name
        );
        Ok(Self { definitions })
    }

    pub fn definitions(&self) -> &[TaskDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
