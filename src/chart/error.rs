//! Build errors for state charts.

use thiserror::Error;

/// A single problem found in a state chart definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DefinitionError {
    #[error("State chart defines no states. Add at least one .state(...)")]
    NoStates,

    #[error("State '{node}' has child states but no initial state. Call .initial(key)")]
    MissingInitial { node: String },

    #[error("Initial state '{initial}' of '{node}' is not one of its children")]
    UnknownInitial { node: String, initial: String },

    #[error("State '{node}' is defined more than once")]
    DuplicateState { node: String },

    #[error("Transition on '{event}' from '{node}' targets unknown state '{target}'")]
    UnknownTarget {
        node: String,
        event: String,
        target: String,
    },
}

/// Errors that can occur when building state charts.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State chart has {} definition problem(s)", .problems.len())]
    Invalid { problems: Vec<DefinitionError> },
}

impl BuildError {
    /// Every problem found, in definition order.
    pub fn problems(&self) -> &[DefinitionError] {
        match self {
            Self::Invalid { problems } => problems,
        }
    }
}
