//! Human-readable backend diagnostics.
//!
//! Fields are free text meant for a person debugging a deployment, not for
//! machine consumption. Building a report never fails.

use super::backend::Backend;
use crate::logging::sanitize_message;
use crate::repo::document_repo::DocumentRepository;
use serde::Serialize;

const MAX_ERROR_CHARS: usize = 80;
const MAX_REPORTED_COLLECTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    /// At most ten collection names.
    pub collections: Vec<String>,
}

impl Backend {
    /// Probes storage and describes what was found.
    pub fn diagnostics(&self) -> Diagnostics {
        let mut report = Diagnostics {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: None,
            database_name: None,
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        };

        let Some(storage) = self.storage() else {
            if self.settings().connection().is_some() {
                report.database = "⚠️  Available but not initialized".to_string();
            }
            return report;
        };

        report.database = "✅ Available".to_string();
        report.database_url = Some(
            if self.settings().database_url.is_some() {
                "✅ Set"
            } else {
                "❌ Not Set"
            }
            .to_string(),
        );
        report.database_name = Some(
            self.settings()
                .database_name
                .clone()
                .unwrap_or_else(|| "❌ Not Set".to_string()),
        );

        match storage.with_repo(|repo| repo.list_collection_names()) {
            Ok(mut names) => {
                names.truncate(MAX_REPORTED_COLLECTIONS);
                report.collections = names;
                report.database = "✅ Connected & Working".to_string();
                report.connection_status = "Connected".to_string();
            }
            Err(err) => {
                report.database = format!(
                    "⚠️  Connected but Error: {}",
                    sanitize_message(&err.to_string(), MAX_ERROR_CHARS)
                );
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use crate::config::StorageConfig;
    use crate::db::Storage;
    use crate::service::backend::Backend;

    #[test]
    fn unconfigured_backend_reports_not_available() {
        let report = Backend::unconfigured().diagnostics();
        assert_eq!(report.backend, "✅ Running");
        assert_eq!(report.database, "❌ Not Available");
        assert_eq!(report.connection_status, "Not Connected");
        assert!(report.collections.is_empty());
    }

    #[test]
    fn failed_open_reports_not_initialized() {
        let backend = Backend::connect(StorageConfig {
            database_url: Some("mongodb://localhost".to_string()),
            database_name: Some("catalog".to_string()),
        });
        assert!(!backend.is_ready());
        let report = backend.diagnostics();
        assert!(report.database.contains("not initialized"));
    }

    #[test]
    fn ready_backend_lists_collections() {
        let backend = Backend::with_storage(Storage::in_memory("catalog").unwrap());
        backend.seed_demo_data().unwrap();

        let report = backend.diagnostics();
        assert_eq!(report.database, "✅ Connected & Working");
        assert_eq!(report.connection_status, "Connected");
        assert_eq!(report.database_name.as_deref(), Some("catalog"));
        assert_eq!(
            report.collections,
            vec!["casestudy", "industrysolution", "product"]
        );
    }
}
