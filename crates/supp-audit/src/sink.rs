//! Structured audit log emission.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use supp_core::entities::AuditEntry;
use supp_core::enums::AuditAction;

/// Flat view of an [`AuditEntry`] as written to the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditLogRecord {
    pub timestamp: DateTime<Utc>,
    pub grouping_id: String,
    pub record_id: String,
    pub action: AuditAction,
    pub actor_name: String,
    pub actor_email: String,
    /// Names of the changed fields, in change-set order.
    pub changed_fields: Vec<String>,
    pub changes: Value,
}

impl AuditLogRecord {
    /// Flatten an entry. A payload that cannot be represented as JSON is
    /// logged as `null`.
    #[must_use]
    pub fn from_entry<T: Serialize>(entry: &AuditEntry<T>) -> Self {
        let changes = serde_json::to_value(entry.payload()).unwrap_or_else(|error| {
            tracing::warn!(%error, "audit payload is not representable as JSON");
            Value::Null
        });
        let changed_fields = changes
            .as_object()
            .map(|fields| fields.keys().cloned().collect())
            .unwrap_or_default();

        Self {
            timestamp: entry.created_at(),
            grouping_id: entry.grouping_id().to_owned(),
            record_id: entry.record_id().to_owned(),
            action: entry.action(),
            actor_name: entry.actor().display_name.clone(),
            actor_email: entry.actor().email.clone(),
            changed_fields,
            changes,
        }
    }
}

/// Destination for audit log records.
pub trait AuditSink: Send + Sync {
    fn emit(&self, record: &AuditLogRecord);
}

/// Emits each record as an `info` event on the `supp_audit` target.
///
/// With the JSON formatter installed every field lands as a top-level key.
/// `tracing` has no nested values, so `changes` is the change-set as one JSON
/// string; `changed_fields` is a comma-separated list for filtering by field
/// name without parsing it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn emit(&self, record: &AuditLogRecord) {
        tracing::info!(
            target: "supp_audit",
            timestamp = %record.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            grouping_id = %record.grouping_id,
            record_id = %record.record_id,
            action = %record.action,
            actor_name = %record.actor_name,
            actor_email = %record.actor_email,
            changed_fields = %record.changed_fields.join(","),
            changes = %record.changes,
            "audit"
        );
    }
}
