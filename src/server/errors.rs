use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationError;

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Unexpected pipeline failure. Full detail is logged under the error
    /// id; the response body stays generic.
    #[error("Internal Server Error during evaluation")]
    Internal { error_id: String },
}

impl ApiError {
    pub fn internal(source: anyhow::Error) -> Self {
        let error_id = uuid::Uuid::new_v4().to_string();
        error!("Error during evaluation [{}]: {:?}", error_id, source);
        ApiError::Internal { error_id }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string() }),
            ),
            ApiError::Internal { error_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Internal Server Error during evaluation",
                    "error_id": error_id,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
