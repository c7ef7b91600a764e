//! Audit archive (S3-compatible object storage) configuration.

use serde::{Deserialize, Serialize};

fn default_bucket_name() -> String {
    String::from("suppression-audit-logs")
}

fn default_region() -> String {
    String::from("eu-central-1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArchiveConfig {
    /// Write a durable JSON copy of every audit entry to object storage.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint (MinIO, LocalStack). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    /// Static credentials. When empty, the standard AWS environment and
    /// instance credential chain is used.
    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Permit plain-HTTP endpoints (local testing only).
    #[serde(default)]
    pub allow_http: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket_name: default_bucket_name(),
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            allow_http: false,
        }
    }
}

impl ArchiveConfig {
    /// Check if the archive has the minimum required fields.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.bucket_name.is_empty() && !self.region.is_empty()
    }

    /// Whether both halves of a static credential pair are set.
    #[must_use]
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }

    /// The custom endpoint, if one is set.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<&str> {
        if self.endpoint.is_empty() {
            None
        } else {
            Some(&self.endpoint)
        }
    }

    /// Whether the custom endpoint is plain HTTP.
    #[must_use]
    pub fn is_plain_http(&self) -> bool {
        self.endpoint_url()
            .is_some_and(|endpoint| endpoint.starts_with("http://"))
    }
}
