use axum::Json;
use axum::http::StatusCode;
use pulse_core::TelemetryError;

use crate::envelope::ErrorEnvelope;

// Single translation point from domain errors to wire responses. Storage
// detail stays in the log; the client only ever sees a generic message.
pub fn map_error(
    err: &TelemetryError,
    request_id: Option<String>,
) -> (StatusCode, Json<ErrorEnvelope>) {
    let (status, message) = match err {
        TelemetryError::InvalidEvent { message } => (StatusCode::BAD_REQUEST, message.clone()),
        TelemetryError::NotFound => (StatusCode::NOT_FOUND, "event not found".to_string()),
        TelemetryError::Storage { message } => {
            tracing::error!(
                request_id = request_id.as_deref().unwrap_or("-"),
                error = %message,
                "storage failure"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal storage error".to_string(),
            )
        }
        TelemetryError::Cancelled { message } => {
            tracing::debug!(
                request_id = request_id.as_deref().unwrap_or("-"),
                reason = %message,
                "request cancelled"
            );
            (
                StatusCode::GATEWAY_TIMEOUT,
                "request timed out".to_string(),
            )
        }
    };

    (status, Json(ErrorEnvelope { error: message }))
}

pub fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorEnvelope>) {
    (
        status,
        Json(ErrorEnvelope {
            error: message.to_string(),
        }),
    )
}
