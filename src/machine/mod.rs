//! The state machine contract the bridge drives.
//!
//! The bridge never computes transitions itself. Anything implementing
//! [`Machine`] can be plugged in: the bundled [`StateChart`](crate::chart::StateChart),
//! a hand-written match over state labels, or a closure via [`MachineFn`].

use crate::core::{Action, Effect, StateValue};

/// Outcome of asking a machine to handle an event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MachineResult {
    /// New state value, `None` when no transition applies
    pub value: Option<StateValue>,

    /// Effects to dispatch, in declaration order
    pub actions: Vec<Effect>,
}

impl MachineResult {
    pub fn new(value: StateValue) -> Self {
        Self {
            value: Some(value),
            actions: Vec::new(),
        }
    }

    /// Result with neither a value nor effects.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_actions<I, E>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Effect>,
    {
        self.actions.extend(actions.into_iter().map(Into::into));
        self
    }
}

/// A finite state machine evaluator.
///
/// Implementations must be pure: the same current value, event and
/// context always yield the same result. `C` is the ambient context passed
/// along with each event, typically the store snapshot.
pub trait Machine<C> {
    /// Value of the machine's initial state.
    fn initial_value(&self) -> StateValue;

    /// Compute the next state and effects for `event`.
    ///
    /// `current` is `None` when the caller has no state yet. Returning `None`
    /// is treated the same as an empty result.
    fn transition(
        &self,
        current: Option<&StateValue>,
        event: &Action,
        context: &C,
    ) -> Option<MachineResult>;
}

/// Machine backed by a transition closure.
///
/// # Example
///
/// ```rust
/// use mindset_bridge::core::{Action, StateValue};
/// use mindset_bridge::machine::{Machine, MachineFn, MachineResult};
///
/// let toggle = MachineFn::new(StateValue::atomic("off"), |current, event: &Action, _: &()| {
///     if !event.is("TOGGLE") {
///         return None;
///     }
///     let next = match current.and_then(StateValue::as_atomic) {
///         Some("on") => "off",
///         _ => "on",
///     };
///     Some(MachineResult::new(StateValue::atomic(next)))
/// });
///
/// let result = toggle.transition(None, &Action::new("TOGGLE"), &()).unwrap();
/// assert_eq!(result.value, Some(StateValue::atomic("on")));
/// ```
pub struct MachineFn<F> {
    initial: StateValue,
    transition: F,
}

impl<F> MachineFn<F> {
    /// Create a machine from its initial value and a transition closure.
    ///
    /// The closure's context parameter type must be annotated.
    pub fn new<C>(initial: StateValue, transition: F) -> Self
    where
        F: Fn(Option<&StateValue>, &Action, &C) -> Option<MachineResult>,
    {
        Self {
            initial,
            transition,
        }
    }
}

impl<C, F> Machine<C> for MachineFn<F>
where
    F: Fn(Option<&StateValue>, &Action, &C) -> Option<MachineResult>,
{
    fn initial_value(&self) -> StateValue {
        self.initial.clone()
    }

    fn transition(
        &self,
        current: Option<&StateValue>,
        event: &Action,
        context: &C,
    ) -> Option<MachineResult> {
        (self.transition)(current, event, context)
    }
}
