//! Synchronizes a state machine with a store.
//!
//! A [`Bridge`] holds the active machine and hands out two pieces that are
//! installed into a store:
//! - a middleware ([`BridgeMiddleware`]) that runs every dispatched action
//!   through the machine and dispatches the resulting state change and
//!   effects
//! - a reducer ([`Bridge::reduce`]) that keeps the machine state value in the
//!   store's own state tree
//!
//! Both read the machine through the bridge at call time, so
//! [`Bridge::set_machine`] takes effect for the very next action.
//!
//! # Example
//!
//! ```rust
//! use mindset_bridge::bridge::{Bridge, MiddlewareOptions};
//! use mindset_bridge::chart::{NodeBuilder, StateChartBuilder};
//! use mindset_bridge::core::{Action, StateValue};
//! use mindset_bridge::store::Store;
//! use serde_json::{json, Value};
//! use std::rc::Rc;
//!
//! let chart = StateChartBuilder::<Value>::new()
//!     .initial("green")
//!     .state(NodeBuilder::new("green").on("TIMER", "yellow"))
//!     .state(NodeBuilder::new("yellow").on("TIMER", "green"))
//!     .build()
//!     .unwrap();
//! let bridge: Bridge<Value> = Bridge::new(Rc::new(chart));
//!
//! let reducer_bridge = bridge.clone();
//! let store = Store::new(json!({"xstate": "green"}), move |state: &Value, action: &Action| {
//!     let current = StateValue::from_json(&state["xstate"]);
//!     json!({"xstate": reducer_bridge.reduce(current.as_ref(), Some(action)).to_json()})
//! })
//! .with_middleware(bridge.middleware(MiddlewareOptions::default()));
//!
//! store.dispatch(Action::new("TIMER")).unwrap();
//! assert_eq!(store.state(), json!({"xstate": "yellow"}));
//! ```

mod error;
mod middleware;
mod options;

pub use error::BridgeError;
pub use middleware::BridgeMiddleware;
pub use options::{
    field_accessor, MachineStateSource, MiddlewareOptions, StateAccessor, DEFAULT_STATE_KEY,
};

use crate::core::{is_equal, Action, StateValue, RESET_MACHINE_STATE, SET_MACHINE_STATE};
use crate::machine::Machine;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{trace, warn};

/// Shared handle to the active machine.
///
/// Clones share the same machine slot. The bridge is single-threaded.
pub struct Bridge<S> {
    machine: Rc<RefCell<Rc<dyn Machine<S>>>>,
}

impl<S: 'static> Bridge<S> {
    pub fn new(machine: Rc<dyn Machine<S>>) -> Self {
        Self {
            machine: Rc::new(RefCell::new(machine)),
        }
    }

    pub fn builder() -> BridgeBuilder<S> {
        BridgeBuilder::new()
    }

    /// Currently held machine.
    pub fn machine(&self) -> Rc<dyn Machine<S>> {
        self.machine.borrow().clone()
    }

    /// Replace the held machine.
    ///
    /// State already stored is left as-is; the next reset or transition
    /// moves it into the new machine's states.
    pub fn set_machine(&self, machine: Rc<dyn Machine<S>>) {
        *self.machine.borrow_mut() = machine;
    }

    /// Initial value of the currently held machine.
    pub fn initial_value(&self) -> StateValue {
        self.machine().initial_value()
    }

    /// Create the middleware half of the bridge.
    pub fn middleware(&self, options: MiddlewareOptions<S>) -> BridgeMiddleware<S> {
        BridgeMiddleware::new(self.clone(), options)
    }

    /// Reduce the stored machine state.
    ///
    /// `current` falls back to the initial value when absent. A reset
    /// returns the initial value of the machine held *now*; a state-set
    /// action with a present payload returns that payload. Anything else
    /// returns `current` unchanged.
    pub fn reduce(&self, current: Option<&StateValue>, action: Option<&Action>) -> StateValue {
        let current = match current {
            Some(value) => value.clone(),
            None => self.initial_value(),
        };

        let Some(action) = action else {
            return current;
        };

        if action.is(RESET_MACHINE_STATE) {
            return self.initial_value();
        }

        if action.is(SET_MACHINE_STATE) {
            if let Some(payload) = action.payload.as_ref().filter(|p| !p.is_null()) {
                match StateValue::from_json(payload) {
                    Some(next) if !next.is_empty() => return next,
                    Some(_) => trace!("ignoring empty machine state payload"),
                    None => warn!(%payload, "machine state payload is not a state value"),
                }
            }
        }

        current
    }

    /// Reducer that runs the machine itself instead of relying on the
    /// middleware.
    ///
    /// Effects are not dispatched in this mode. The new value is returned
    /// only when it differs structurally from `current`.
    pub fn transition_reduce(
        &self,
        current: Option<&StateValue>,
        action: &Action,
        context: &S,
    ) -> StateValue {
        let current = match current {
            Some(value) => value.clone(),
            None => self.initial_value(),
        };

        let next = self
            .machine()
            .transition(Some(&current), action, context)
            .and_then(|result| result.value);

        match next {
            Some(next) if !is_equal(Some(&current), Some(&next)) => next,
            _ => current,
        }
    }
}

impl<S> Clone for Bridge<S> {
    fn clone(&self) -> Self {
        Self {
            machine: Rc::clone(&self.machine),
        }
    }
}

/// Builder for [`Bridge`].
pub struct BridgeBuilder<S> {
    machine: Option<Rc<dyn Machine<S>>>,
}

impl<S: 'static> BridgeBuilder<S> {
    pub fn new() -> Self {
        Self { machine: None }
    }

    /// Set the machine to drive (required).
    pub fn machine(mut self, machine: Rc<dyn Machine<S>>) -> Self {
        self.machine = Some(machine);
        self
    }

    pub fn build(self) -> Result<Bridge<S>, BridgeError> {
        let machine = self.machine.ok_or(BridgeError::MissingMachine)?;
        Ok(Bridge::new(machine))
    }
}

impl<S: 'static> Default for BridgeBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{reset_machine_state_action, set_machine_state_action};
    use crate::machine::{MachineFn, MachineResult};
    use serde_json::json;

    fn cycle(states: [&'static str; 2]) -> Rc<dyn Machine<()>> {
        Rc::new(MachineFn::new(
            StateValue::atomic(states[0]),
            move |current, event: &Action, _: &()| {
                if !event.is("TIMER") {
                    return current.cloned().map(MachineResult::new);
                }
                let next = if current.and_then(StateValue::as_atomic) == Some(states[0]) {
                    states[1]
                } else {
                    states[0]
                };
                Some(MachineResult::new(StateValue::atomic(next)))
            },
        ))
    }

    #[test]
    fn builder_requires_machine() {
        let result = BridgeBuilder::<()>::new().build();

        assert!(matches!(result, Err(BridgeError::MissingMachine)));
    }

    #[test]
    fn builder_builds_with_machine() {
        let bridge = Bridge::builder().machine(cycle(["green", "yellow"])).build().unwrap();

        assert_eq!(bridge.initial_value(), StateValue::atomic("green"));
    }

    #[test]
    fn reduce_defaults_to_initial_value() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));

        assert_eq!(bridge.reduce(None, None), StateValue::atomic("green"));
    }

    #[test]
    fn reduce_applies_state_set_payload() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        let green = StateValue::atomic("green");

        let next = bridge.reduce(
            Some(&green),
            Some(&set_machine_state_action(&StateValue::atomic("yellow"))),
        );

        assert_eq!(next, StateValue::atomic("yellow"));
    }

    #[test]
    fn reduce_ignores_absent_or_empty_payload() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        let green = StateValue::atomic("green");

        let bare = Action::new(SET_MACHINE_STATE);
        let null = Action::new(SET_MACHINE_STATE).with_payload(json!(null));
        let empty = Action::new(SET_MACHINE_STATE).with_payload(json!(""));
        let number = Action::new(SET_MACHINE_STATE).with_payload(json!(0));

        for action in [bare, null, empty, number] {
            assert_eq!(bridge.reduce(Some(&green), Some(&action)), green);
        }
    }

    #[test]
    fn reduce_resets_to_initial_value() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));

        let next = bridge.reduce(
            Some(&StateValue::atomic("yellow")),
            Some(&reset_machine_state_action()),
        );

        assert_eq!(next, StateValue::atomic("green"));
    }

    #[test]
    fn reduce_keeps_state_for_unknown_action() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        let green = StateValue::atomic("green");

        assert_eq!(bridge.reduce(Some(&green), Some(&Action::new("UNKNOWN"))), green);
    }

    #[test]
    fn set_machine_changes_initial_and_reset() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        assert_eq!(bridge.reduce(None, None), StateValue::atomic("green"));

        bridge.set_machine(cycle(["blue", "green"]));

        assert_eq!(bridge.reduce(None, None), StateValue::atomic("blue"));
        assert_eq!(
            bridge.reduce(
                Some(&StateValue::atomic("green")),
                Some(&reset_machine_state_action())
            ),
            StateValue::atomic("blue")
        );
    }

    #[test]
    fn set_machine_is_shared_by_clones() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        let other = bridge.clone();

        other.set_machine(cycle(["blue", "green"]));

        assert_eq!(bridge.initial_value(), StateValue::atomic("blue"));
    }

    #[test]
    fn transition_reduce_moves_on_known_event() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));

        assert_eq!(
            bridge.transition_reduce(None, &Action::new("TIMER"), &()),
            StateValue::atomic("yellow")
        );
        assert_eq!(
            bridge.transition_reduce(Some(&StateValue::atomic("yellow")), &Action::new("TIMER"), &()),
            StateValue::atomic("green")
        );
    }

    #[test]
    fn transition_reduce_keeps_state_for_unknown_event() {
        let bridge = Bridge::new(cycle(["green", "yellow"]));
        let yellow = StateValue::atomic("yellow");

        assert_eq!(bridge.transition_reduce(Some(&yellow), &Action::new("UNKNOWN"), &()), yellow);
    }
}
