//! # supp-config
//!
//! Layered configuration loading for the suppression audit service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SUPP_*` prefix, `__` as separator)
//! 2. Project-level `.supp/config.toml`
//! 3. User-level `~/.config/supp/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SUPP_ARCHIVE__ENABLED` -> `archive.enabled`,
//! `SUPP_ACTOR__EMAIL` -> `actor.email`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use supp_config::SuppConfig;
//!
//! let config = SuppConfig::load_with_dotenv().expect("config");
//!
//! if config.archive.enabled {
//!     println!("archiving audit entries to {}", config.archive.bucket_name);
//! }
//! ```

mod actor;
mod archive;
mod audit;
mod database;
mod error;

pub use actor::ActorConfig;
pub use archive::ArchiveConfig;
pub use audit::AuditConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SuppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub actor: ActorConfig,
}

impl SuppConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed. An
    /// incomplete archive section is not an error here; the archive client
    /// rejects it when it is built.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::figment().extract()?)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".supp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SUPP_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("supp").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SuppConfig::default();
        assert!(!config.archive.enabled);
        assert!(!config.audit.blank_as_absent);
        assert!(!config.actor.is_configured());
        assert_eq!(config.database.path, ".supp/suppressions.db");
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: SuppConfig = SuppConfig::figment().extract()?;
            assert!(!config.archive.enabled);
            assert_eq!(config.archive.region, "eu-central-1");
            Ok(())
        });
    }
}
