use std::sync::Arc;

use log::debug;

use cronveyor_actions::ActionRegistry;
use cronveyor_models::core::TaskDefinition;
use cronveyor_models::errors::ScheduleError;

pub struct TaskInvoker {
    actions: Arc<ActionRegistry>,
}

impl TaskInvoker {
    pub fn new(actions: Arc<ActionRegistry>) -> Self {
        Self { actions }
    }

    // Actions are synchronous and may block for as long as they like, so
    // they run on the blocking pool rather than a runtime worker.
    pub async fn invoke(&self, task: &TaskDefinition) -> Result<(), ScheduleError> {
        let action = self.actions.resolve(&task.action_name).ok_or_else(|| {
            ScheduleError::ActionNotFound {
                action: task.action_name.clone(),
            }
        })?;

        debug!("Invoking action `{}` for task `{}`", task.action_name, task.name);

        let handle = tokio::task::spawn_blocking(move || action.execute());
        match handle.await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(ScheduleError::InvocationFailed {
                action: task.action_name.clone(),
                message: err.to_string(),
            }),
            Err(err) => Err(ScheduleError::InvocationFailed {
                action: task.action_name.clone(),
                message: format!("action panicked during execution: {}", err),
            }),
        }
    }
}
