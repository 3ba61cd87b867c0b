//! Middleware half of the bridge.

use super::options::MiddlewareOptions;
use super::Bridge;
use crate::core::{is_equal, set_machine_state_action, Action, SET_MACHINE_STATE};
use crate::store::{DispatchResult, Middleware, MiddlewareApi};
use tracing::{debug, trace};

/// Runs every dispatched action through the bridge's machine.
///
/// For each action the middleware
/// 1. reads the machine state from the snapshot taken before the action,
/// 2. passes the action on down the chain,
/// 3. asks the machine for the next state, dispatching a state-set action
///    when it structurally differs from the state read in step 1,
/// 4. dispatches the transition's effects in declaration order.
///
/// State-set actions are passed on without consulting the machine.
pub struct BridgeMiddleware<S> {
    bridge: Bridge<S>,
    options: MiddlewareOptions<S>,
}

impl<S: 'static> BridgeMiddleware<S> {
    pub fn new(bridge: Bridge<S>, options: MiddlewareOptions<S>) -> Self {
        Self { bridge, options }
    }
}

impl<S: 'static> Middleware<S> for BridgeMiddleware<S> {
    fn handle(
        &self,
        api: &dyn MiddlewareApi<S>,
        action: Action,
        next: &dyn Fn(Action) -> DispatchResult,
    ) -> DispatchResult {
        let snapshot = api.state();
        let machine_state = self.options.read(&snapshot);
        let result = next(action.clone())?;

        if action.is(SET_MACHINE_STATE) {
            return Ok(result);
        }

        let transition = self
            .bridge
            .machine()
            .transition(machine_state.as_ref(), &action, &snapshot)
            .unwrap_or_default();

        match transition.value.filter(|value| !value.is_empty()) {
            Some(value) if !is_equal(machine_state.as_ref(), Some(&value)) => {
                debug!(event = %action.kind, state = %value, "machine state changed");
                api.dispatch(set_machine_state_action(&value))?;
            }
            _ => trace!(event = %action.kind, "machine state unchanged"),
        }

        for effect in transition.actions {
            debug!(event = %action.kind, effect = effect.event_type(), "dispatching effect");
            api.dispatch(effect.into_action())?;
        }

        Ok(result)
    }
}
