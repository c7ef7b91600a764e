//! Acting identity for CLI sessions.

use serde::{Deserialize, Serialize};
use supp_core::identity::ActorIdentity;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActorConfig {
    #[serde(default)]
    pub display_name: String,

    #[serde(default)]
    pub email: String,
}

impl ActorConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.display_name.trim().is_empty() && !self.email.trim().is_empty()
    }

    /// The configured identity, or `None` if either field is blank.
    #[must_use]
    pub fn identity(&self) -> Option<ActorIdentity> {
        self.is_configured().then(|| {
            ActorIdentity::new(self.display_name.trim(), self.email.trim())
        })
    }
}
