//! Durable audit archive on S3-compatible object storage.
//!
//! Each audit entry becomes one pretty-printed JSON object at
//! `{groupingId}/{recordId}/{instant}.json`, uploaded with its content type,
//! length and base64 MD5 digest.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use object_store::aws::{AmazonS3Builder, Checksum};
use object_store::path::{Path, PathPart};
use object_store::{Attribute, AttributeValue, Attributes, ObjectStore, PutOptions, PutPayload};
use serde::Serialize;
use supp_config::ArchiveConfig;
use supp_core::entities::AuditEntry;
use supp_core::enums::AuditAction;
use supp_core::identity::ActorIdentity;

use crate::error::ArchiveError;

pub const CONTENT_TYPE_JSON: &str = "application/json";

fn iso_instant(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ---------------------------------------------------------------------------
// ObjectKey
// ---------------------------------------------------------------------------

/// Object key of one archived audit entry.
///
/// Segments are stored literally, so the object store path is always the
/// `Display` form `{groupingId}/{recordId}/{instant}.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    path: Path,
}

impl ObjectKey {
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidKey`] if either id is blank, contains
    /// `/`, or cannot be stored as a literal path segment (`.`, `..`,
    /// control characters).
    pub fn new(
        grouping_id: &str,
        record_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, ArchiveError> {
        let file_name = format!("{}.json", iso_instant(timestamp));
        let path = [
            literal_segment(grouping_id)?,
            literal_segment(record_id)?,
            literal_segment(&file_name)?,
        ]
        .into_iter()
        .collect();
        Ok(Self { path })
    }

    #[must_use]
    pub fn to_path(&self) -> Path {
        self.path.clone()
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.path, f)
    }
}

/// `PathPart::from` would percent-encode reserved characters (`*`, `#`,
/// `%`, ...) and change the key; `PathPart::parse` keeps them as written.
fn literal_segment(segment: &str) -> Result<PathPart<'_>, ArchiveError> {
    if segment.trim().is_empty() {
        return Err(ArchiveError::InvalidKey {
            segment: segment.to_owned(),
            reason: "empty segment",
        });
    }
    if segment.contains('/') {
        return Err(ArchiveError::InvalidKey {
            segment: segment.to_owned(),
            reason: "segment contains '/'",
        });
    }
    PathPart::parse(segment).map_err(|_| ArchiveError::InvalidKey {
        segment: segment.to_owned(),
        reason: "segment cannot be stored literally",
    })
}

// ---------------------------------------------------------------------------
// ArchiveDocument
// ---------------------------------------------------------------------------

/// Body of an archived object. Field order is the serialized key order.
#[derive(Debug, Serialize)]
pub struct ArchiveDocument<'a, T: Serialize> {
    pub timestamp: String,
    #[serde(rename = "securityControlId")]
    pub security_control_id: &'a str,
    #[serde(rename = "serId")]
    pub ser_id: &'a str,
    pub action: AuditAction,
    pub user: &'a ActorIdentity,
    pub changes: &'a T,
}

impl<'a, T: Serialize> ArchiveDocument<'a, T> {
    #[must_use]
    pub fn from_entry(entry: &'a AuditEntry<T>) -> Self {
        Self {
            timestamp: iso_instant(entry.created_at()),
            security_control_id: entry.grouping_id(),
            ser_id: entry.record_id(),
            action: entry.action(),
            user: entry.actor(),
            changes: entry.payload(),
        }
    }
}

// ---------------------------------------------------------------------------
// Object store client
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutObjectRequest {
    pub bucket: String,
    pub key: ObjectKey,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub content_length: usize,
    /// Base64 of the MD5 digest of `body`.
    pub content_md5: String,
}

/// Uploads one object. Implemented over `object_store` for S3 and in
/// memory; tests substitute their own.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), ArchiveError>;
}

/// [`ObjectStoreClient`] backed by an `object_store` implementation bound
/// to a single bucket.
///
/// The MD5 digest and length travel as user metadata
/// (`x-amz-meta-content-md5`, `x-amz-meta-content-length`), which S3 stores
/// but does not check. Server-side integrity checking comes from the SHA-256
/// checksum that [`Self::from_config`] enables.
#[derive(Debug, Clone)]
pub struct S3ObjectClient {
    bucket: String,
    store: Arc<dyn ObjectStore>,
}

impl S3ObjectClient {
    #[must_use]
    pub fn new(bucket: impl Into<String>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            bucket: bucket.into(),
            store,
        }
    }

    /// Build an S3 client from the archive section. Credentials not set in
    /// config are taken from the standard `AWS_*` environment.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Config`] if the section is incomplete or names
    /// a plain-HTTP endpoint without `allow_http`, and [`ArchiveError::Store`]
    /// if the builder rejects it.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        if !config.is_configured() {
            return Err(ArchiveError::Config(
                "archive requires bucket_name and region".into(),
            ));
        }
        if config.is_plain_http() && !config.allow_http {
            return Err(ArchiveError::Config(
                "plain HTTP endpoint requires archive.allow_http = true".into(),
            ));
        }

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket_name)
            .with_region(&config.region)
            .with_checksum_algorithm(Checksum::SHA256)
            .with_allow_http(config.allow_http);

        if let Some(endpoint) = config.endpoint_url() {
            builder = builder.with_endpoint(endpoint);
        }
        if config.has_static_credentials() {
            builder = builder
                .with_access_key_id(&config.access_key_id)
                .with_secret_access_key(&config.secret_access_key);
        }

        let store = builder.build()?;
        Ok(Self::new(config.bucket_name.clone(), Arc::new(store)))
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ObjectStoreClient for S3ObjectClient {
    async fn put_object(&self, request: PutObjectRequest) -> Result<(), ArchiveError> {
        if request.bucket != self.bucket {
            return Err(ArchiveError::BucketMismatch {
                expected: self.bucket.clone(),
                actual: request.bucket,
            });
        }

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(request.content_type),
        );
        attributes.insert(
            Attribute::Metadata("content-md5".into()),
            AttributeValue::from(request.content_md5),
        );
        attributes.insert(
            Attribute::Metadata("content-length".into()),
            AttributeValue::from(request.content_length.to_string()),
        );
        let opts = PutOptions {
            attributes,
            ..PutOptions::default()
        };

        let path = request.key.to_path();
        tracing::debug!(bucket = %self.bucket, %path, bytes = request.content_length, "put_object");
        self.store
            .put_opts(&path, PutPayload::from(request.body), opts)
            .await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AuditArchive
// ---------------------------------------------------------------------------

/// Writes audit entries to one bucket through an [`ObjectStoreClient`].
#[derive(Clone)]
pub struct AuditArchive {
    bucket: String,
    client: Arc<dyn ObjectStoreClient>,
}

impl fmt::Debug for AuditArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuditArchive")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl AuditArchive {
    #[must_use]
    pub fn new(bucket: impl Into<String>, client: Arc<dyn ObjectStoreClient>) -> Self {
        Self {
            bucket: bucket.into(),
            client,
        }
    }

    /// # Errors
    ///
    /// See [`S3ObjectClient::from_config`].
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        let client = S3ObjectClient::from_config(config)?;
        Ok(Self::new(config.bucket_name.clone(), Arc::new(client)))
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Build the upload request for an entry without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Serialize`] or [`ArchiveError::InvalidKey`].
    pub fn prepare<T: Serialize>(
        &self,
        entry: &AuditEntry<T>,
    ) -> Result<PutObjectRequest, ArchiveError> {
        let key = ObjectKey::new(entry.grouping_id(), entry.record_id(), entry.created_at())?;
        let body = serde_json::to_vec_pretty(&ArchiveDocument::from_entry(entry))?;
        let content_md5 = STANDARD.encode(md5::compute(&body).0);

        Ok(PutObjectRequest {
            bucket: self.bucket.clone(),
            key,
            content_type: CONTENT_TYPE_JSON,
            content_length: body.len(),
            content_md5,
            body,
        })
    }

    /// Serialize and upload one entry. No retry.
    ///
    /// # Errors
    ///
    /// Any failure while building or sending the request.
    pub async fn store<T: Serialize + Sync>(
        &self,
        entry: &AuditEntry<T>,
    ) -> Result<ObjectKey, ArchiveError> {
        let request = self.prepare(entry)?;
        let key = request.key.clone();
        self.client.put_object(request).await?;
        Ok(key)
    }
}
