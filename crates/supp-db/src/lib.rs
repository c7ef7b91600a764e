//! # supp-db
//!
//! libSQL storage for suppression records and the audited service layer on
//! top of it.
//!
//! [`SuppDb`] is raw record access keyed by `(id, ser_id)`. [`SuppService`]
//! adds validation, finding-type derivation, field-level diffs and audit
//! publishing to every mutation.
//!
//! [`SuppService`]: service::SuppService

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use std::path::Path;

use error::DatabaseError;
use libsql::Builder;
use supp_config::DatabaseConfig;

/// Database handle for suppression records.
pub struct SuppDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SuppDb {
    /// Open a local database at the given path, or `:memory:`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let supp_db = Self { db, conn };
        supp_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(supp_db)
    }

    /// Open the database named by config, creating its parent directory.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.is_in_memory() {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DatabaseError::Other(anyhow::anyhow!(
                            "failed to create {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }
        Self::open_local(&config.path).await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
