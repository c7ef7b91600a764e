//! # supp-audit
//!
//! Change auditing for suppression records:
//! - [`diff`]: field-level diff between two versions of an [`Auditable`]
//!   record, driven by its static field table
//! - [`sink`]: structured log emission of audit entries
//! - [`archive`]: durable JSON copies on S3-compatible object storage,
//!   keyed `{groupingId}/{recordId}/{instant}.json` with an MD5 digest
//! - [`publisher`]: log-then-archive, with archive failures isolated from
//!   the caller
//!
//! [`Auditable`]: supp_core::fields::Auditable

pub mod archive;
pub mod diff;
pub mod error;
pub mod publisher;
pub mod sink;

pub use archive::{AuditArchive, ObjectKey, ObjectStoreClient, PutObjectRequest, S3ObjectClient};
pub use diff::{BlankPolicy, DiffOptions, compute_diff, compute_diff_with};
pub use error::ArchiveError;
pub use publisher::AuditPublisher;
pub use sink::{AuditLogRecord, AuditSink, TracingSink};
