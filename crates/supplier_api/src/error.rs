//! HTTP error mapping.
//!
//! Every error body has a `detail` message. Validation failures also list
//! the offending fields under `errors`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use std::fmt::{Display, Formatter};
use supplier_core::{ServiceError, ValidationError};

#[derive(Debug)]
pub enum ApiError {
    /// Body is not parseable JSON.
    BadRequest(String),
    Validation(ValidationError),
    NotFound,
    StorageUnavailable,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::StorageUnavailable | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client-facing `detail` text. Internal causes are logged, never shown.
impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "Invalid JSON body: {message}"),
            Self::Validation(_) => write!(f, "Validation failed"),
            Self::NotFound => write!(f, "Not found"),
            Self::StorageUnavailable => write!(f, "Database not configured"),
            Self::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::StorageUnavailable => Self::StorageUnavailable,
            ServiceError::Validation(err) => Self::Validation(err),
            ServiceError::NotFound { .. } => Self::NotFound,
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        let body = match &self {
            Self::Validation(err) => json!({ "detail": detail, "errors": err.issues() }),
            Self::Internal(message) => {
                error!(
                    "event=request_failed module=api status=error error_code=internal error={message}"
                );
                json!({ "detail": detail })
            }
            _ => json!({ "detail": detail }),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::http::StatusCode;
    use supplier_core::{ServiceError, ValidationError};

    #[test]
    fn internal_detail_hides_cause() {
        let err = ApiError::Internal("disk I/O error at /var/db".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let validation = ApiError::from(ServiceError::Validation(ValidationError::single(
            "email",
            "field required",
        )));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "Validation failed");

        let unavailable = ApiError::from(ServiceError::StorageUnavailable);
        assert_eq!(unavailable.to_string(), "Database not configured");
        assert_eq!(unavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
