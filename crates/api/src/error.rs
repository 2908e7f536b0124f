use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use infra::StoreError;
use serde::Serialize;
use thiserror::Error;

/// Errors raised outside GraphQL execution: the JWT middleware, the health
/// check and token signing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("store unavailable")]
    Store(#[from] StoreError),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Same vocabulary as the GraphQL `code` extension.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Store(_) | AppError::Internal(_) => "INTERNAL",
            AppError::Unauthorized(_) => "UNAUTHENTICATED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(e) => tracing::error!("Store error: {e}"),
            AppError::Internal(msg) => tracing::error!("Internal error: {msg}"),
            AppError::Unauthorized(_) => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
