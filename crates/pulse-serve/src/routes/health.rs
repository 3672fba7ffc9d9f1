use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::envelope::DataEnvelope;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, body = DataEnvelope<HealthStatus>))
)]
pub(crate) async fn health() -> Response {
    Json(DataEnvelope {
        data: HealthStatus { status: "ok" },
    })
    .into_response()
}
