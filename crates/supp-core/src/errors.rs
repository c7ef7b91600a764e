//! Cross-cutting error types.
//!
//! Domain-specific errors (`DatabaseError`, `ArchiveError`, `ConfigError`)
//! live in their respective crates. The CLI converges everything into
//! `anyhow::Error` at the binary boundary.

use thiserror::Error;

/// Errors that can be raised by any suppression crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Audit entry construction inputs were malformed (missing keys).
    #[error("Invalid audit entry: {0}")]
    InvalidEntry(String),

    /// No authenticated actor is attached to the request context.
    #[error("No authenticated actor in request context")]
    UnauthenticatedContext,

    /// Record data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
