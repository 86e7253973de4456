use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::store::StoreError;
use serde::Serialize;

/// Structured error response returned by API endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. Currently always `INTERNAL_ERROR`.
    #[schema(example = "INTERNAL_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "An unexpected error occurred")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Store(err) => tracing::error!("Record store error: {}", err),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
        }

        let body = ErrorBody {
            code: "INTERNAL_ERROR",
            message: "An unexpected error occurred".into(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}
