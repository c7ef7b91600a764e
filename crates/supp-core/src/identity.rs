use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The authenticated identity responsible for a mutation.
///
/// Produced once at the request boundary (the CLI resolves it from config)
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ActorIdentity {
    pub display_name: String,
    pub email: String,
}

impl ActorIdentity {
    #[must_use]
    pub fn new(display_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}

/// Request-scoped context passed explicitly into every mutating operation.
///
/// Holds the actor, if one was authenticated. There is no ambient or global
/// actor state: whoever builds the context decides who is acting.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    actor: Option<ActorIdentity>,
}

impl RequestContext {
    /// Context for an authenticated actor.
    #[must_use]
    pub const fn authenticated(actor: ActorIdentity) -> Self {
        Self { actor: Some(actor) }
    }

    /// Context with no actor. Mutations attempted with it fail.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { actor: None }
    }

    /// The acting identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnauthenticatedContext`] if no actor is attached.
    pub fn current_actor(&self) -> Result<&ActorIdentity, CoreError> {
        self.actor.as_ref().ok_or(CoreError::UnauthenticatedContext)
    }
}
