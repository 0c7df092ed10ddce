use std::sync::Arc;
use std::time::Instant;

use log::info;

use cronveyor_actions::{Action, ActionRegistry};
use cronveyor_models::errors::SendableError;
use cronveyor_utilities::logger;

struct HeartbeatAction {
    started: Instant,
}

impl Action for HeartbeatAction {
    fn name(&self) -> String {
        "heartbeat".to_string()
    }

    fn execute(&self) -> Result<(), SendableError> {
        info!("Heartbeat: up for {}s", self.started.elapsed().as_secs());
        Ok(())
    }
}

pub fn builtin_actions() -> ActionRegistry {
    let mut registry = ActionRegistry::new();
    registry.register(Arc::new(HeartbeatAction {
        started: Instant::now(),
    }));
    registry.register_fn("log_environment", || {
        logger::print_env()?;
        Ok(())
    });
    registry
}
