//! Catalog and lead-capture domain model.
//!
//! # Responsibility
//! - Define the canonical entity shapes persisted by the document store.
//! - Own the validation contract applied to every inbound payload.
//!
//! # Invariants
//! - Each entity maps 1:1 to a collection named by its lowercase type name.
//! - Cross-entity slugs are soft references and are never resolved here.
//! - Entities carry no storage identifier; identity is assigned on insert.

pub mod case_study;
pub mod product;
pub mod rfq;
pub mod solution;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validation::ValidationError;

/// A schema-validated record stored in its own collection.
pub trait Entity: Serialize + DeserializeOwned + Sized {
    /// Collection name, the lowercase entity type name.
    const COLLECTION: &'static str;

    /// Parses and validates an untrusted JSON payload.
    ///
    /// Unknown fields are ignored. On failure every offending field is
    /// reported, not only the first one.
    fn from_json(value: &Value) -> Result<Self, ValidationError>;

    /// Re-checks an already-typed instance against the same contract as
    /// [`Entity::from_json`].
    ///
    /// Used by write paths that build entities in code (seed, admin inserts).
    fn validate(&self) -> Result<(), ValidationError> {
        let value = serde_json::to_value(self)
            .map_err(|err| ValidationError::single(Self::COLLECTION, err.to_string()))?;
        Self::from_json(&value).map(|_| ())
    }
}
