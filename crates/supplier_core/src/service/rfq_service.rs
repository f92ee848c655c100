//! RFQ submission use-case.
//!
//! RFQs are write-once leads: this service only ever inserts them.

use super::ServiceResult;
use crate::model::rfq::Rfq;
use crate::repo::document_repo::DocumentRepository;
use crate::repo::entity_repo::{EntityRepository, Stored};
use log::info;

pub struct RfqService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> RfqService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a validated RFQ and returns its new identifier.
    ///
    /// Contact details are never logged; only counts and the id are.
    pub fn submit(&self, rfq: &Rfq) -> ServiceResult<String> {
        let id = self.repo.create_entity(rfq)?;
        info!(
            "event=rfq_submit module=service status=ok id={} product_count={} has_quantity={}",
            id,
            rfq.product_slugs.len(),
            rfq.quantity.is_some()
        );
        Ok(id)
    }

    /// Reads back one RFQ by identifier.
    pub fn get(&self, id: &str) -> ServiceResult<Option<Stored<Rfq>>> {
        Ok(self.repo.find_entity_by_id::<Rfq>(id)?)
    }
}
