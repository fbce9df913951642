use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ErrorResponse;

/// Terminal failures of the ingest pipeline. None of them is retried.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("API token missing")]
    MissingCredential,

    #[error("Invalid API token")]
    InvalidCredential,

    #[error("Invalid payload")]
    InvalidPayload,

    /// Carries the stringified downstream failure back to the caller.
    #[error("{0}")]
    Downstream(String),
}

impl IngestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            IngestError::MissingCredential => StatusCode::UNAUTHORIZED,
            IngestError::InvalidCredential => StatusCode::FORBIDDEN,
            IngestError::InvalidPayload => StatusCode::BAD_REQUEST,
            IngestError::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
