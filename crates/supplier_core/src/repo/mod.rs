//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define generic document access contracts keyed by collection name.
//! - Isolate SQLite/JSON query details from service orchestration.
//! - Map typed entities to and from stored documents.
//!
//! # Invariants
//! - Entity writes must pass `Entity::validate()` before persistence.
//! - Identifiers are assigned by storage, never taken from the payload.
//! - "No matching documents" is an empty result, never an error.

pub mod document_repo;
pub mod entity_repo;
