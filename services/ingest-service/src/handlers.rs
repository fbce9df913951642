use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use serde_json::Value;

use crate::error::IngestError;
use crate::influx::ForwardError;
use crate::line_protocol::{encode_lines, measurements};
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// `POST /api/v1/data`: validate, encode and forward one measurement batch.
pub async fn ingest_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, IngestError> {
    let document = parse_json_body(&headers, &body).inspect_err(|err| {
        tracing::warn!(error = %err, "request body is not JSON");
    })?;
    tracing::debug!(body = %document, "received measurement batch");

    let measurements = measurements(&document).inspect_err(|err| {
        tracing::warn!(error = %err, "measurements field missing");
    })?;
    let payload = encode_lines(measurements);
    tracing::debug!(payload = %payload, "line protocol payload");

    let lines = measurements.len();
    if let Err(err) = state.writer.write(payload).await {
        match &err {
            ForwardError::Status { status, body } => {
                tracing::error!(status = %status, response = %body, lines, "influx write rejected");
            }
            ForwardError::Transport(source) => {
                tracing::error!(error = %source, lines, "influx write failed");
            }
        }
        return Err(IngestError::Downstream(err.to_string()));
    }

    tracing::info!(lines, "measurements forwarded");
    Ok(StatusCode::OK)
}

// Only `application/json` bodies are read; anything else has no measurements.
fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, IngestError> {
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"));
    if !is_json {
        return Err(IngestError::InvalidPayload);
    }
    serde_json::from_slice(body).map_err(|_| IngestError::InvalidPayload)
}
