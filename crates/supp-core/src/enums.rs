//! Enums for suppression records and the audit trail.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in an audit entry.
///
/// Serialized in upper case (`"CREATE"`), which is the form written into
/// archived audit objects and structured log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Security products that have a fixed finding type.
///
/// Any other product name is stored as-is and leaves `finding_type` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    Inspector,
    SecurityHub,
}

impl Product {
    /// Match a product name exactly, ignoring ASCII case. Surrounding
    /// whitespace is not stripped.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("Inspector") {
            Some(Self::Inspector)
        } else if name.eq_ignore_ascii_case("Security Hub") {
            Some(Self::SecurityHub)
        } else {
            None
        }
    }

    /// The finding type every record of this product carries.
    #[must_use]
    pub const fn finding_type(self) -> &'static str {
        match self {
            Self::Inspector => "Vulnerabilities",
            Self::SecurityHub => "Industry and Regulatory Standards",
        }
    }
}
