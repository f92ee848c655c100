//! Process-wide backend handle shared by every request.
//!
//! # Responsibility
//! - Open storage once from configuration and keep it for the process lifetime.
//! - Check storage readiness before every use-case call.
//!
//! # Invariants
//! - A missing or failed storage setup never aborts startup; it surfaces as
//!   `ServiceError::StorageUnavailable` on each call instead.
//! - Payload validation runs before the readiness check, so malformed input
//!   is reported as a client error even without storage.

use super::catalog_service::CatalogService;
use super::rfq_service::RfqService;
use super::seed_service::{SeedReport, SeedService};
use super::{ServiceError, ServiceResult};
use crate::config::StorageConfig;
use crate::db::Storage;
use crate::model::case_study::CaseStudy;
use crate::model::product::Product;
use crate::model::rfq::Rfq;
use crate::model::solution::IndustrySolution;
use crate::model::Entity;
use crate::repo::document_repo::{DocumentFilter, SqliteDocumentRepository};
use crate::repo::entity_repo::{EntityRepository, Stored};
use log::{error, info, warn};
use serde_json::Value;
use std::sync::Arc;

/// Cheaply cloneable handle to the shared storage connection.
#[derive(Clone)]
pub struct Backend {
    storage: Option<Arc<Storage>>,
    settings: StorageConfig,
}

impl Backend {
    /// Opens storage when both connection settings are present.
    pub fn connect(settings: StorageConfig) -> Self {
        let storage = match settings.connection() {
            Some((url, name)) => match Storage::open(url, name) {
                Ok(storage) => {
                    info!("event=storage_init module=service status=ok database_name={name}");
                    Some(Arc::new(storage))
                }
                Err(err) => {
                    error!(
                        "event=storage_init module=service status=error error_code=storage_open_failed error={err}"
                    );
                    None
                }
            },
            None => {
                warn!("event=storage_init module=service status=skipped reason=not_configured");
                None
            }
        };
        Self { storage, settings }
    }

    /// Wraps an already opened storage.
    pub fn with_storage(storage: Storage) -> Self {
        let settings = StorageConfig {
            database_url: Some(storage.database_url().to_string()),
            database_name: Some(storage.database_name().to_string()),
        };
        Self {
            storage: Some(Arc::new(storage)),
            settings,
        }
    }

    /// Backend without storage; every storage-backed call fails.
    pub fn unconfigured() -> Self {
        Self {
            storage: None,
            settings: StorageConfig::default(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.storage.is_some()
    }

    pub fn settings(&self) -> &StorageConfig {
        &self.settings
    }

    pub(crate) fn storage(&self) -> Option<&Storage> {
        self.storage.as_deref()
    }

    fn run<T>(
        &self,
        f: impl FnOnce(SqliteDocumentRepository<'_>) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let storage = self.storage().ok_or(ServiceError::StorageUnavailable)?;
        storage.with_repo(f)
    }

    pub fn list_products(&self) -> ServiceResult<Vec<Stored<Product>>> {
        self.run(|repo| CatalogService::new(repo).list_products())
    }

    pub fn get_product(&self, slug: &str) -> ServiceResult<Stored<Product>> {
        self.run(|repo| CatalogService::new(repo).get_product(slug))
    }

    pub fn list_solutions(
        &self,
        segment: Option<&str>,
    ) -> ServiceResult<Vec<Stored<IndustrySolution>>> {
        self.run(|repo| CatalogService::new(repo).list_solutions(segment))
    }

    pub fn list_case_studies(&self) -> ServiceResult<Vec<Stored<CaseStudy>>> {
        self.run(|repo| CatalogService::new(repo).list_case_studies())
    }

    /// Validates an RFQ payload and persists it; returns the new identifier.
    pub fn submit_rfq(&self, payload: &Value) -> ServiceResult<String> {
        let rfq = Rfq::from_json(payload)?;
        self.run(|repo| RfqService::new(repo).submit(&rfq))
    }

    pub fn get_rfq(&self, id: &str) -> ServiceResult<Option<Stored<Rfq>>> {
        self.run(|repo| RfqService::new(repo).get(id))
    }

    /// Counts every document in `E`'s collection.
    pub fn count<E: Entity>(&self) -> ServiceResult<u64> {
        self.run(|repo| Ok(repo.count_entities::<E>(&DocumentFilter::new())?))
    }

    pub fn seed_demo_data(&self) -> ServiceResult<SeedReport> {
        self.run(|repo| SeedService::new(repo).seed_demo_data())
    }
}
