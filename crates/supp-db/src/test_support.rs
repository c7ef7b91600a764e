//! Shared test utilities for supp-db tests.

pub(crate) mod helpers {
    use std::sync::{Arc, Mutex};

    use supp_audit::{AuditLogRecord, AuditPublisher, AuditSink, DiffOptions};
    use supp_core::entities::Suppression;
    use supp_core::identity::{ActorIdentity, RequestContext};

    use crate::SuppDb;
    use crate::service::SuppService;

    /// Sink that keeps every emitted record.
    #[derive(Default)]
    pub struct RecordingSink(Mutex<Vec<AuditLogRecord>>);

    impl RecordingSink {
        pub fn records(&self) -> Vec<AuditLogRecord> {
            self.0.lock().unwrap().clone()
        }
    }

    impl AuditSink for RecordingSink {
        fn emit(&self, record: &AuditLogRecord) {
            self.0.lock().unwrap().push(record.clone());
        }
    }

    /// In-memory service with a recording, log-only publisher.
    pub async fn test_service() -> (SuppService, Arc<RecordingSink>) {
        test_service_with_options(DiffOptions::default()).await
    }

    pub async fn test_service_with_options(
        options: DiffOptions,
    ) -> (SuppService, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        let publisher = Arc::new(AuditPublisher::new(sink.clone()));
        let db = SuppDb::open_local(":memory:").await.unwrap();
        (SuppService::new(db, publisher, options), sink)
    }

    pub fn actor_ctx() -> RequestContext {
        RequestContext::authenticated(ActorIdentity::new("Ada Lovelace", "ada@example.com"))
    }

    /// A record that passes create and update validation.
    pub fn inspector_record(id: &str) -> Suppression {
        Suppression {
            finding_title: Some("OpenSSL buffer overflow".into()),
            product_name: Some("Inspector".into()),
            ser_link: Some("https://ser.example.com/SER-100".into()),
            due_date: Some("2025-06-30".into()),
            resource_type: Some("AwsEc2Instance".into()),
            ..Suppression::new(id, "SER-100")
        }
    }
}
