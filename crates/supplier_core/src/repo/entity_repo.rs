//! Typed entity access over the generic document repository.
//!
//! # Responsibility
//! - Serialize validated entities into their collection.
//! - Decode stored documents back into entities annotated with `_id`.
//!
//! # Invariants
//! - `create_entity` runs `Entity::validate()` before any write.
//! - Decoded documents must satisfy the entity schema; violations surface as
//!   `RepoError::InvalidData`.

use super::document_repo::{
    Document, DocumentFilter, DocumentRepository, RepoError, RepoResult, ID_FIELD,
};
use crate::model::Entity;
use serde::Serialize;
use serde_json::Value;

/// Entity annotated with its storage identifier.
///
/// Serializes as the entity's fields plus `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stored<E> {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub entity: E,
}

impl<E: Entity> Stored<E> {
    fn decode(document: Document) -> RepoResult<Self> {
        let Document { id, body } = document;
        let entity = serde_json::from_value::<E>(Value::Object(body)).map_err(|err| {
            RepoError::InvalidData(format!(
                "document `{id}` in `{}` does not match schema: {err}",
                E::COLLECTION
            ))
        })?;
        entity.validate().map_err(|err| {
            RepoError::InvalidData(format!(
                "document `{id}` in `{}` failed validation: {err}",
                E::COLLECTION
            ))
        })?;
        Ok(Self { id, entity })
    }
}

/// Typed operations available on every document repository.
pub trait EntityRepository: DocumentRepository {
    /// Validates and inserts `entity`; returns the assigned identifier.
    fn create_entity<E: Entity>(&self, entity: &E) -> RepoResult<String> {
        entity.validate()?;
        let body = match serde_json::to_value(entity)? {
            Value::Object(mut body) => {
                body.remove(ID_FIELD);
                body.remove("id");
                body
            }
            other => {
                return Err(RepoError::InvalidData(format!(
                    "`{}` entity serialized to non-object `{other}`",
                    E::COLLECTION
                )));
            }
        };
        self.insert_document(E::COLLECTION, &body)
    }

    fn list_entities<E: Entity>(&self, filter: &DocumentFilter) -> RepoResult<Vec<Stored<E>>> {
        self.find_documents(E::COLLECTION, filter)?
            .into_iter()
            .map(Stored::decode)
            .collect()
    }

    fn find_entity<E: Entity>(&self, filter: &DocumentFilter) -> RepoResult<Option<Stored<E>>> {
        self.find_one_document(E::COLLECTION, filter)?
            .map(Stored::decode)
            .transpose()
    }

    fn find_entity_by_id<E: Entity>(&self, id: &str) -> RepoResult<Option<Stored<E>>> {
        self.find_document_by_id(E::COLLECTION, id)?
            .map(Stored::decode)
            .transpose()
    }

    fn count_entities<E: Entity>(&self, filter: &DocumentFilter) -> RepoResult<u64> {
        self.count_documents(E::COLLECTION, filter)
    }
}

impl<R: DocumentRepository + ?Sized> EntityRepository for R {}
