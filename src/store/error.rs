//! Dispatch errors.

use thiserror::Error;

/// Errors a middleware can raise to stop a dispatch.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dispatch of '{action}' rejected: {reason}")]
    Rejected { action: String, reason: String },
}
