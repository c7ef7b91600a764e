use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::changes::ChangeSet;
use crate::enums::AuditAction;
use crate::errors::CoreError;
use crate::identity::{ActorIdentity, RequestContext};

/// An immutable record of one mutation: who, what, which record, when.
///
/// Built exactly once per mutating operation, after the mutation and its
/// change-set are known. Fields are private; `created_at` is fixed at
/// construction.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuditEntry<T = ChangeSet> {
    action: AuditAction,
    actor: ActorIdentity,
    grouping_id: String,
    record_id: String,
    payload: T,
    created_at: DateTime<Utc>,
}

impl<T> AuditEntry<T> {
    /// Build an entry for the actor attached to `ctx`, stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// - [`CoreError::UnauthenticatedContext`] if `ctx` carries no actor.
    /// - [`CoreError::InvalidEntry`] if `grouping_id` or `record_id` is blank.
    pub fn create(
        ctx: &RequestContext,
        action: AuditAction,
        grouping_id: impl Into<String>,
        record_id: impl Into<String>,
        payload: T,
    ) -> Result<Self, CoreError> {
        let actor = ctx.current_actor()?.clone();
        let grouping_id = grouping_id.into();
        let record_id = record_id.into();

        if grouping_id.trim().is_empty() {
            return Err(CoreError::InvalidEntry("grouping id is required".into()));
        }
        if record_id.trim().is_empty() {
            return Err(CoreError::InvalidEntry("record id is required".into()));
        }

        Ok(Self {
            action,
            actor,
            grouping_id,
            record_id,
            payload,
            created_at: Utc::now(),
        })
    }

    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.action
    }

    #[must_use]
    pub const fn actor(&self) -> &ActorIdentity {
        &self.actor
    }

    #[must_use]
    pub fn grouping_id(&self) -> &str {
        &self.grouping_id
    }

    #[must_use]
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    #[must_use]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
