//! Audit behaviour switches.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditConfig {
    /// Treat blank string values as "no value" when diffing.
    #[serde(default)]
    pub blank_as_absent: bool,

    /// Emit logs (audit events included) as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}
