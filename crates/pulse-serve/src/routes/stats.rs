use crate::envelope::DataEnvelope;
use crate::middleware::request_id::RequestId;
use crate::routes::error::map_error;
use crate::routes::events::parse_rfc3339;
use crate::{AppState, with_store};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use pulse_core::types::EventStats;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, serde::Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    pub event_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events/stats/hourly", get(hourly_stats))
        .route("/events/stats/daily", get(daily_stats))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/events/stats/hourly",
    params(StatsQuery),
    responses((status = 200, body = DataEnvelope<Vec<EventStats>>))
)]
pub(crate) async fn hourly_stats(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<StatsQuery>,
) -> Response {
    let from = query.from.as_deref().and_then(parse_rfc3339);
    let to = query.to.as_deref().and_then(parse_rfc3339);
    let event_name = query.event_name.unwrap_or_default();
    match with_store(&state, move |telemetry| {
        telemetry.analytics().hourly(&event_name, from, to)
    })
    .await
    {
        Ok(stats) => Json(DataEnvelope { data: stats }).into_response(),
        Err(err) => map_error(&err, Some(request_id.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/events/stats/daily",
    params(StatsQuery),
    responses((status = 200, body = DataEnvelope<Vec<EventStats>>))
)]
pub(crate) async fn daily_stats(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<StatsQuery>,
) -> Response {
    let from = query.from.as_deref().and_then(parse_rfc3339);
    let to = query.to.as_deref().and_then(parse_rfc3339);
    let event_name = query.event_name.unwrap_or_default();
    match with_store(&state, move |telemetry| {
        telemetry.analytics().daily(&event_name, from, to)
    })
    .await
    {
        Ok(stats) => Json(DataEnvelope { data: stats }).into_response(),
        Err(err) => map_error(&err, Some(request_id.0)).into_response(),
    }
}
