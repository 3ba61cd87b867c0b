//! Middleware configuration: where to find the machine state in a snapshot.

use crate::core::StateValue;
use serde_json::Value;
use std::rc::Rc;

/// Field the default accessor reads the machine state from.
pub const DEFAULT_STATE_KEY: &str = "xstate";

/// Reads the machine state out of a store snapshot.
pub type StateAccessor<S> = Rc<dyn Fn(&S) -> Option<StateValue>>;

/// Store state types with a conventional place for the machine state.
pub trait MachineStateSource {
    /// The machine state held by this snapshot, if any.
    fn machine_state(&self) -> Option<StateValue>;
}

impl MachineStateSource for Value {
    fn machine_state(&self) -> Option<StateValue> {
        self.get(DEFAULT_STATE_KEY).and_then(StateValue::from_json)
    }
}

/// Accessor reading the machine state from a named field of a JSON snapshot.
pub fn field_accessor(key: &str) -> impl Fn(&Value) -> Option<StateValue> {
    let key = key.to_string();
    move |snapshot: &Value| snapshot.get(&key).and_then(StateValue::from_json)
}

/// Options for [`Bridge::middleware`](super::Bridge::middleware).
pub struct MiddlewareOptions<S> {
    pub(crate) get_state: StateAccessor<S>,
}

impl<S> MiddlewareOptions<S> {
    /// Options using `accessor` to read the machine state.
    pub fn with_accessor<F>(accessor: F) -> Self
    where
        F: Fn(&S) -> Option<StateValue> + 'static,
    {
        Self {
            get_state: Rc::new(accessor),
        }
    }

    /// Replace the state accessor.
    pub fn get_state<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&S) -> Option<StateValue> + 'static,
    {
        self.get_state = Rc::new(accessor);
        self
    }

    pub(crate) fn read(&self, snapshot: &S) -> Option<StateValue> {
        (self.get_state)(snapshot)
    }
}

impl<S: MachineStateSource> MiddlewareOptions<S> {
    pub fn new() -> Self {
        Self::with_accessor(|snapshot: &S| snapshot.machine_state())
    }
}

impl<S: MachineStateSource> Default for MiddlewareOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for MiddlewareOptions<S> {
    fn clone(&self) -> Self {
        Self {
            get_state: Rc::clone(&self.get_state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_reads_xstate_field() {
        let options = MiddlewareOptions::<Value>::default();

        assert_eq!(
            options.read(&json!({"xstate": "green", "todos": []})),
            Some(StateValue::atomic("green"))
        );
        assert_eq!(options.read(&json!({"todos": []})), None);
    }

    #[test]
    fn custom_field_accessor() {
        let options = MiddlewareOptions::with_accessor(field_accessor("customReducerName"));

        assert_eq!(
            options.read(&json!({"customReducerName": {"green": "pink"}})),
            Some(StateValue::from_path(&["green", "pink"]))
        );
        assert_eq!(options.read(&json!({"xstate": "green"})), None);
    }

    #[test]
    fn field_accessor_outlives_borrowed_key() {
        let options = {
            let key = format!("{}_{}", "machine", "state");
            MiddlewareOptions::with_accessor(field_accessor(&key))
        };

        assert_eq!(
            options.read(&json!({"machine_state": "red"})),
            Some(StateValue::atomic("red"))
        );
    }

    #[test]
    fn get_state_overrides_default() {
        let options = MiddlewareOptions::<Value>::new().get_state(|_| Some(StateValue::atomic("fixed")));

        assert_eq!(options.read(&json!({"xstate": "green"})), Some(StateValue::atomic("fixed")));
    }
}
