use std::sync::Arc;

use anyhow::Context;
use supp_audit::{AuditPublisher, DiffOptions};
use supp_config::SuppConfig;
use supp_core::identity::RequestContext;
use supp_db::SuppDb;
use supp_db::service::SuppService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SuppService,
    pub config: SuppConfig,
    /// The request boundary: the actor for every mutation in this process.
    pub request: RequestContext,
}

impl AppContext {
    pub async fn init(config: SuppConfig) -> anyhow::Result<Self> {
        let db = SuppDb::open(&config.database)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        let publisher = build_publisher(&config);
        let service = SuppService::new(
            db,
            Arc::new(publisher),
            DiffOptions::from(&config.audit),
        );
        let request = request_context(&config);

        Ok(Self {
            service,
            config,
            request,
        })
    }
}

/// Archive-enabled publisher, or log-only if the archive client cannot be
/// built. Archival never blocks a mutation.
fn build_publisher(config: &SuppConfig) -> AuditPublisher {
    match AuditPublisher::from_config(&config.archive) {
        Ok(publisher) => publisher,
        Err(error) => {
            tracing::warn!(%error, "audit archive unavailable; publishing to log only");
            AuditPublisher::default()
        }
    }
}

fn request_context(config: &SuppConfig) -> RequestContext {
    config
        .actor
        .identity()
        .map_or_else(RequestContext::anonymous, RequestContext::authenticated)
}
