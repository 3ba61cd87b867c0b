//! Bridge errors.

use thiserror::Error;

/// Errors raised while wiring the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Machine not specified. Call .machine(machine) before .build()")]
    MissingMachine,
}
