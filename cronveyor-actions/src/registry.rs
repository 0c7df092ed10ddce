use std::collections::HashMap;
use std::sync::Arc;

use log::info;

use cronveyor_models::errors::SendableError;

use crate::action::Action;

struct FnAction<F> {
    name: String,
    body: F,
}

impl<F> Action for FnAction<F>
where
    F: Fn() -> Result<(), SendableError> + Send + Sync,
{
    fn name(&self) -> String {
        self.name.clone()
    }

    fn execute(&self) -> Result<(), SendableError> {
        (self.body)()
    }
}

// The lookup that replaces by-name reflection: the owning application
// registers every invocable action under a stable key before the
// dispatcher starts, and definitions refer to actions only by that key.
#[derive(Default)]
pub struct ActionRegistry {
    actions: HashMap<String, Arc<dyn Action>>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
        }
    }

    pub fn register(&mut self, action: Arc<dyn Action>) {
        let name = action.name();
        if self.actions.insert(name.clone(), action).is_some() {
            info!("Action `{}` re-registered, previous entry replaced", name);
        }
    }

    pub fn register_fn<F>(&mut self, name: &str, body: F)
    where
        F: Fn() -> Result<(), SendableError> + Send + Sync + 'static,
    {
        self.register(Arc::new(FnAction {
            name: name.to_string(),
            body,
        }));
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.actions.keys().cloned().collect()
    }
}

pub fn print_actions(registry: &ActionRegistry) {
    info!("{} action(s) registered", registry.len());
    for name in registry.names() {
        info!("Action `{}`", name);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingAction {
        calls: Arc<AtomicUsize>,
    }

    impl Action for CountingAction {
        fn name(&self) -> String {
            "counting".to_string()
        }

        fn execute(&self) -> Result<(), SendableError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn resolves_registered_actions_by_name() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ActionRegistry::new();
        registry.register(Arc::new(CountingAction {
            calls: calls.clone(),
        }));

        let action = registry.resolve("counting").expect("action registered");
        action.execute().unwrap();
        action.execute().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let registry = ActionRegistry::new();
        assert!(registry.resolve("nothing-here").is_none());
    }

    #[test]
    fn closures_register_like_actions() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut registry = ActionRegistry::new();
        let counter = calls.clone();
        registry.register_fn("bump", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        registry.resolve("bump").unwrap().execute().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_propagate_to_the_caller() {
        let mut registry = ActionRegistry::new();
        registry.register_fn("broken", || Err("backing service refused".into()));

        let err = registry.resolve("broken").unwrap().execute().unwrap_err();
        assert!(err.to_string().contains("backing service refused"));
    }

    #[test]
    fn re_registration_replaces_the_previous_action() {
        let mut registry = ActionRegistry::new();
        registry.register_fn("job", || Err("old".into()));
        registry.register_fn("job", || Ok(()));

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("job").unwrap().execute().is_ok());
    }
}
