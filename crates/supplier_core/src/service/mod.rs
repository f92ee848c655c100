//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP layer decoupled from storage details.
//! - Distinguish "storage unavailable" from "no matching documents".

pub mod backend;
pub mod catalog_service;
pub mod diagnostics;
pub mod rfq_service;
pub mod seed_service;

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::repo::document_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for catalog and lead-capture use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Storage was never configured or failed to open at startup.
    StorageUnavailable,
    /// Inbound payload violates the entity schema.
    Validation(ValidationError),
    /// Single-entity lookup found no match.
    NotFound {
        collection: &'static str,
        key: String,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable => write!(f, "database not configured"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, key } => write!(f, "{collection} not found: {key}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::StorageUnavailable | Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ServiceError {
    fn from(value: DbError) -> Self {
        Self::Repo(RepoError::Db(value))
    }
}
