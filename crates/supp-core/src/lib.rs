//! # supp-core
//!
//! Core types shared across all suppression crates:
//! - The `Suppression` record and the `AuditEntry` envelope
//! - The `AuditAction` enum
//! - Field descriptor tables (`Auditable`) used by the diff engine
//! - `ChangeSet` / `FieldChange` payload types
//! - Actor identity and the explicit request context
//! - Input validation rules for suppression records
//! - Cross-cutting error types

pub mod changes;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod fields;
pub mod identity;
pub mod validation;
