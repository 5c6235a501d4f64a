//! Request-level error type.
//!
//! Every handler returns `Result<_, AppError>`. Expected misses (a reference the
//! provider does not know) never reach this type; validation failures and
//! upstream faults do, and are rendered as JSON bodies with a matching status.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::provider::types::ProviderError;
use crate::storage::types::StoreError;
use crate::verses::resolver::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(String),

    #[error("login required")]
    Unauthorized,

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("{0}")]
    Conflict(String),

    #[error("upstream failure: {0}")]
    Upstream(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl AppError {
    pub fn validation(field: &str, message: &str) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Validation { field, message } => ErrorBody {
                error: "validation failed".to_string(),
                errors: BTreeMap::from([(field.clone(), vec![message.clone()])]),
            },
            // Internal details stay in the log.
            AppError::Upstream(detail) => {
                tracing::error!("Upstream failure: {}", detail);
                ErrorBody {
                    error: "Something went wrong, please try again later".to_string(),
                    errors: BTreeMap::new(),
                }
            }
            AppError::Internal(err) => {
                tracing::error!("Internal error: {:#}", err);
                ErrorBody {
                    error: "Something went wrong, please try again later".to_string(),
                    errors: BTreeMap::new(),
                }
            }
            other => ErrorBody {
                error: other.to_string(),
                errors: BTreeMap::new(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            StoreError::DuplicateUsername(_) => {
                AppError::Conflict("Username is already taken".to_string())
            }
            other => AppError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Provider(err) => err.into(),
            ResolveError::Store(err) => err.into(),
        }
    }
}
