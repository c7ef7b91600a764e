//! Service layer: validated, audited mutations over `SuppDb`.
//!
//! Every mutation follows the same protocol:
//! 1. Resolve the actor from the request context
//! 2. Validate input and check existence
//! 3. Execute SQL
//! 4. Diff the old and new versions
//! 5. Publish the audit entry (log, then optional archive)
//!
//! A failure in step 5 is logged by the publisher and never surfaces here.

use std::sync::Arc;

use supp_audit::{AuditPublisher, DiffOptions, compute_diff_with};
use supp_core::changes::ChangeSet;
use supp_core::entities::{AuditEntry, Suppression};
use supp_core::enums::AuditAction;
use supp_core::identity::RequestContext;
use supp_core::validation::{validate_for_create, validate_for_update};

use crate::SuppDb;
use crate::error::DatabaseError;

pub struct SuppService {
    db: SuppDb,
    publisher: Arc<AuditPublisher>,
    diff: DiffOptions,
}

impl SuppService {
    #[must_use]
    pub const fn new(db: SuppDb, publisher: Arc<AuditPublisher>, diff: DiffOptions) -> Self {
        Self {
            db,
            publisher,
            diff,
        }
    }

    /// # Errors
    ///
    /// `NotFound` if no record has this key.
    pub async fn get(&self, id: &str, ser_id: &str) -> Result<Suppression, DatabaseError> {
        tracing::info!(id, ser_id, "getting suppression");
        self.db
            .get_suppression(id, ser_id)
            .await?
            .ok_or_else(|| not_found(id, ser_id))
    }

    /// All records, sorted by `id`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list(&self) -> Result<Vec<Suppression>, DatabaseError> {
        let records = self.db.list_suppressions().await?;
        tracing::info!(count = records.len(), "listed suppressions");
        Ok(records)
    }

    /// Create a record and publish a `CREATE` audit entry.
    ///
    /// # Errors
    ///
    /// - `Core(UnauthenticatedContext)` if the context carries no actor
    /// - `Validation` if required fields are blank or a product rule fails
    /// - `AlreadyExists` if the key is taken
    pub async fn create(
        &self,
        ctx: &RequestContext,
        mut record: Suppression,
    ) -> Result<Suppression, DatabaseError> {
        ctx.current_actor()?;
        validate_for_create(&record)?;

        if self.db.get_suppression(&record.id, &record.ser_id).await?.is_some() {
            return Err(DatabaseError::AlreadyExists {
                id: record.id,
                ser_id: record.ser_id,
            });
        }

        record.derive_finding_type();
        self.db.insert_suppression(&record).await?;

        let changes = compute_diff_with(None, Some(&record), AuditAction::Create, &self.diff);
        self.audit(ctx, AuditAction::Create, &record, changes).await?;
        tracing::info!(%record, "created suppression");
        Ok(record)
    }

    /// Replace a stored record and publish an `UPDATE` audit entry.
    ///
    /// # Errors
    ///
    /// - `Core(UnauthenticatedContext)` if the context carries no actor
    /// - `Validation` if required fields are blank or a product rule fails
    /// - `NotFound` if no record has this key
    /// - `NoChanges` if the input matches the stored record
    pub async fn update(
        &self,
        ctx: &RequestContext,
        mut record: Suppression,
    ) -> Result<Suppression, DatabaseError> {
        ctx.current_actor()?;
        validate_for_update(&record)?;

        let old = self
            .db
            .get_suppression(&record.id, &record.ser_id)
            .await?
            .ok_or_else(|| not_found(&record.id, &record.ser_id))?;

        record.derive_finding_type();
        if record == old {
            return Err(DatabaseError::NoChanges);
        }

        self.db.update_suppression(&record).await?;

        let changes = compute_diff_with(Some(&old), Some(&record), AuditAction::Update, &self.diff);
        self.audit(ctx, AuditAction::Update, &record, changes).await?;
        tracing::info!(%record, "updated suppression");
        Ok(record)
    }

    /// Delete a record and publish a `DELETE` audit entry.
    ///
    /// # Errors
    ///
    /// - `Core(UnauthenticatedContext)` if the context carries no actor
    /// - `NotFound` if no record has this key
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        id: &str,
        ser_id: &str,
    ) -> Result<Suppression, DatabaseError> {
        ctx.current_actor()?;

        let old = self
            .db
            .get_suppression(id, ser_id)
            .await?
            .ok_or_else(|| not_found(id, ser_id))?;

        self.db.delete_suppression(id, ser_id).await?;

        let changes = compute_diff_with(Some(&old), None, AuditAction::Delete, &self.diff);
        self.audit(ctx, AuditAction::Delete, &old, changes).await?;
        tracing::info!(record = %old, "deleted suppression");
        Ok(old)
    }

    /// Build the entry for a mutation that has already been applied and
    /// hand it to the publisher.
    async fn audit(
        &self,
        ctx: &RequestContext,
        action: AuditAction,
        record: &Suppression,
        changes: ChangeSet,
    ) -> Result<(), DatabaseError> {
        let entry = AuditEntry::create(ctx, action, &record.ser_id, &record.id, changes)?;
        self.publisher.publish(&entry).await;
        Ok(())
    }
}

fn not_found(id: &str, ser_id: &str) -> DatabaseError {
    DatabaseError::NotFound {
        id: id.to_owned(),
        ser_id: ser_id.to_owned(),
    }
}
