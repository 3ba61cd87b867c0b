//! Actions flowing through the store, and the effects machines declare.

use super::value::StateValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reverts the stored machine state to the current machine's initial value.
pub const RESET_MACHINE_STATE: &str = "XSTATE/RESET_MACHINE_STATE";

/// Carries a new machine state value as payload.
pub const SET_MACHINE_STATE: &str = "XSTATE/SET_MACHINE_STATE";

/// An event dispatched to the store: `{ type, payload?, ..fields }`.
///
/// Extra fields are kept as-is so that effect descriptors with arbitrary
/// members are dispatched unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: None,
            fields: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Check the action type.
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Side effect declared by a machine transition.
///
/// Serializes as either a bare event type string or a full action object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Effect {
    /// Shorthand for an action with only a type
    Named(String),

    /// Complete action descriptor, dispatched as-is
    Full(Action),
}

impl Effect {
    /// Event type this effect dispatches.
    pub fn event_type(&self) -> &str {
        match self {
            Self::Named(kind) => kind,
            Self::Full(action) => &action.kind,
        }
    }

    /// Normalize to the action to dispatch.
    pub fn into_action(self) -> Action {
        match self {
            Self::Named(kind) => Action::new(kind),
            Self::Full(action) => action,
        }
    }
}

impl From<&str> for Effect {
    fn from(kind: &str) -> Self {
        Self::Named(kind.to_string())
    }
}

impl From<String> for Effect {
    fn from(kind: String) -> Self {
        Self::Named(kind)
    }
}

impl From<Action> for Effect {
    fn from(action: Action) -> Self {
        Self::Full(action)
    }
}

/// Action asking the machine state reducer to return to the initial value.
pub fn reset_machine_state_action() -> Action {
    Action::new(RESET_MACHINE_STATE)
}

/// Action storing `value` as the machine state.
pub fn set_machine_state_action(value: &StateValue) -> Action {
    Action::new(SET_MACHINE_STATE).with_payload(value.to_json())
}
