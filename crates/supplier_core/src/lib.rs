//! Core domain logic for the industrial supplier catalog backend.
//! This crate is the single source of truth for schema and storage invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, StorageConfig};
pub use db::{DbError, Storage};
pub use logging::{default_log_level, init_logging};
pub use model::case_study::CaseStudy;
pub use model::product::{Certification, Product};
pub use model::rfq::Rfq;
pub use model::solution::IndustrySolution;
pub use model::validation::{FieldIssue, ValidationError};
pub use model::Entity;
pub use repo::document_repo::{
    Document, DocumentFilter, DocumentRepository, RepoError, RepoResult, SqliteDocumentRepository,
};
pub use repo::entity_repo::{EntityRepository, Stored};
pub use service::backend::Backend;
pub use service::diagnostics::Diagnostics;
pub use service::seed_service::SeedReport;
pub use service::{ServiceError, ServiceResult};

/// Liveness message served at the API root.
pub fn liveness_message() -> &'static str {
    "Oil & Gas Supplier Backend Ready"
}

#[cfg(test)]
mod tests {
    use super::liveness_message;

    #[test]
    fn liveness_message_is_stable() {
        assert_eq!(liveness_message(), "Oil & Gas Supplier Backend Ready");
    }
}
