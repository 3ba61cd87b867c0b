//! Core value types and pure queries.
//!
//! This module contains the data shared by every other part of the crate:
//! - State values via the `StateValue` enum
//! - Store actions and machine-declared effects
//! - Structural comparison and dotted-path lookup of state values
//!
//! All logic in this module is pure (no side effects).

mod action;
mod compare;
mod path;
mod value;

pub use action::{
    reset_machine_state_action, set_machine_state_action, Action, Effect, RESET_MACHINE_STATE,
    SET_MACHINE_STATE,
};
pub use compare::is_equal;
pub use path::is_in_state;
pub use value::StateValue;
