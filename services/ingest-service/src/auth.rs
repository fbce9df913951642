use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::IngestError;
use crate::state::AppState;

pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Compares the caller's `X-API-Token` against the configured token.
///
/// An empty header counts as missing. The comparison is a plain `==`.
pub fn check_token(headers: &HeaderMap, expected: &str) -> Result<(), IngestError> {
    let Some(value) = headers.get(API_TOKEN_HEADER) else {
        return Err(IngestError::MissingCredential);
    };
    if value.is_empty() {
        return Err(IngestError::MissingCredential);
    }
    match value.to_str() {
        Ok(token) if token == expected => Ok(()),
        _ => Err(IngestError::InvalidCredential),
    }
}

/// Router-wide gate. Runs ahead of every route, including the fallback.
pub async fn require_api_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Err(err) = check_token(request.headers(), &state.config.api_token) {
        tracing::warn!(
            method = %request.method(),
            path = %request.uri().path(),
            error = %err,
            "request rejected"
        );
        return err.into_response();
    }
    next.run(request).await
}
