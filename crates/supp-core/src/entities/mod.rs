//! Entity structs for suppression records and their audit trail.
//!
//! `Suppression` maps to the `suppressions` table in `supp-db`.
//! `AuditEntry` is never stored locally: it is published to the log sink and,
//! optionally, archived to object storage.

mod audit;
mod suppression;

pub use audit::AuditEntry;
pub use suppression::Suppression;
