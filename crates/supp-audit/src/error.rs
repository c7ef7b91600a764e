//! Archive error types.
//!
//! Archival is a secondary path: these errors are logged by the publisher
//! and never reach the caller of a mutating operation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to serialize audit document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid object key segment {segment:?}: {reason}")]
    InvalidKey { segment: String, reason: &'static str },

    #[error("object store is bound to bucket '{expected}', request targets '{actual}'")]
    BucketMismatch { expected: String, actual: String },

    #[error("object store error: {0}")]
    Store(#[from] object_store::Error),

    #[error("archive configuration error: {0}")]
    Config(String),
}
