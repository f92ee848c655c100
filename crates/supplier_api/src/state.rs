//! Shared application state handed to every handler.

use crate::error::ApiError;
use supplier_core::{Backend, ServiceResult};

#[derive(Clone)]
pub struct AppState {
    backend: Backend,
}

impl AppState {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Runs a blocking backend call on the blocking thread pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Backend) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let backend = self.backend.clone();
        tokio::task::spawn_blocking(move || f(&backend))
            .await
            .map_err(|err| ApiError::Internal(format!("blocking task failed: {err}")))?
            .map_err(ApiError::from)
    }
}
