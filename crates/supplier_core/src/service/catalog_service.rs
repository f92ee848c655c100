//! Catalog read use-cases.
//!
//! # Invariants
//! - Listings return storage-default order; callers must not rely on it.
//! - Segment filtering is exact and case-sensitive.
//! - Single-product lookup by slug reports absence as `NotFound`.

use super::{ServiceError, ServiceResult};
use crate::model::case_study::CaseStudy;
use crate::model::product::Product;
use crate::model::solution::IndustrySolution;
use crate::model::Entity;
use crate::repo::document_repo::{DocumentFilter, DocumentRepository};
use crate::repo::entity_repo::{EntityRepository, Stored};

/// Read-only catalog facade over repository implementations.
pub struct CatalogService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> CatalogService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_products(&self) -> ServiceResult<Vec<Stored<Product>>> {
        Ok(self.repo.list_entities::<Product>(&DocumentFilter::new())?)
    }

    /// Gets the first product whose `slug` equals `slug` exactly.
    pub fn get_product(&self, slug: &str) -> ServiceResult<Stored<Product>> {
        let filter = DocumentFilter::new().eq("slug", slug);
        self.repo
            .find_entity::<Product>(&filter)?
            .ok_or_else(|| ServiceError::NotFound {
                collection: Product::COLLECTION,
                key: slug.to_string(),
            })
    }

    /// Lists industry solutions, optionally restricted to one segment.
    ///
    /// An empty `segment` string is treated as "no filter".
    pub fn list_solutions(
        &self,
        segment: Option<&str>,
    ) -> ServiceResult<Vec<Stored<IndustrySolution>>> {
        let filter = match segment.filter(|value| !value.is_empty()) {
            Some(segment) => DocumentFilter::new().eq("segment", segment),
            None => DocumentFilter::new(),
        };
        Ok(self.repo.list_entities::<IndustrySolution>(&filter)?)
    }

    pub fn list_case_studies(&self) -> ServiceResult<Vec<Stored<CaseStudy>>> {
        Ok(self.repo.list_entities::<CaseStudy>(&DocumentFilter::new())?)
    }
}
