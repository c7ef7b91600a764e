//! Audit publisher: structured log first, optional archive second.

use std::sync::Arc;

use serde::Serialize;
use supp_config::ArchiveConfig;
use supp_core::entities::AuditEntry;

use crate::archive::{AuditArchive, ObjectKey};
use crate::error::ArchiveError;
use crate::sink::{AuditLogRecord, AuditSink, TracingSink};

/// Publishes audit entries.
///
/// Every entry is emitted to the sink. When an archive is attached the entry
/// is also uploaded; an upload failure is logged and dropped so it can never
/// fail the mutation that produced the entry.
#[derive(Clone)]
pub struct AuditPublisher {
    sink: Arc<dyn AuditSink>,
    archive: Option<AuditArchive>,
}

impl std::fmt::Debug for AuditPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditPublisher")
            .field("archive", &self.archive)
            .finish_non_exhaustive()
    }
}

impl Default for AuditPublisher {
    fn default() -> Self {
        Self::new(Arc::new(TracingSink))
    }
}

impl AuditPublisher {
    /// Log-only publisher.
    #[must_use]
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self {
            sink,
            archive: None,
        }
    }

    #[must_use]
    pub fn with_archive(mut self, archive: AuditArchive) -> Self {
        self.archive = Some(archive);
        self
    }

    /// Tracing sink, plus an S3 archive when `config.enabled`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError`] if archival is enabled and the S3 client
    /// cannot be built.
    pub fn from_config(config: &ArchiveConfig) -> Result<Self, ArchiveError> {
        let publisher = Self::default();
        if !config.enabled {
            return Ok(publisher);
        }
        Ok(publisher.with_archive(AuditArchive::from_config(config)?))
    }

    #[must_use]
    pub const fn archive(&self) -> Option<&AuditArchive> {
        self.archive.as_ref()
    }

    /// Emit the entry, then archive it if an archive is attached.
    pub async fn publish<T: Serialize + Sync>(&self, entry: &AuditEntry<T>) {
        self.sink.emit(&AuditLogRecord::from_entry(entry));

        if let Some(outcome) = self.archive_entry(entry).await {
            match outcome {
                Ok(key) => tracing::debug!(%key, "audit entry archived"),
                Err(error) => tracing::error!(
                    %error,
                    grouping_id = entry.grouping_id(),
                    record_id = entry.record_id(),
                    action = %entry.action(),
                    "failed to archive audit entry"
                ),
            }
        }
    }

    /// `None` when no archive is attached.
    async fn archive_entry<T: Serialize + Sync>(
        &self,
        entry: &AuditEntry<T>,
    ) -> Option<Result<ObjectKey, ArchiveError>> {
        match &self.archive {
            Some(archive) => Some(archive.store(entry).await),
            None => None,
        }
    }
}
