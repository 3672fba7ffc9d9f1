use crate::envelope::{DataEnvelope, ErrorEnvelope};
use crate::middleware::request_id::RequestId;
use crate::routes::error::{error_response, map_error};
use crate::{AppState, with_store};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use pulse_core::types::{CreateEventRequest, Event, EventFilter};
use utoipa::{IntoParams, ToSchema};

// Every parameter is accepted as raw text; anything that fails to parse is
// dropped rather than rejected, matching the tolerant query contract.
#[derive(Debug, Default, serde::Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    pub event_name: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", get(get_event))
        .with_state(state)
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, body = DataEnvelope<Event>),
        (status = 400, body = ErrorEnvelope)
    )
)]
pub(crate) async fn create_event(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Result<Json<CreateEventRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(input)) = body else {
        return error_response(StatusCode::BAD_REQUEST, "invalid request body").into_response();
    };
    match with_store(&state, move |telemetry| telemetry.events().create(input)).await {
        Ok(event) => (StatusCode::CREATED, Json(DataEnvelope { data: event })).into_response(),
        Err(err) => map_error(&err, Some(request_id.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(("id" = i64, Path, description = "Event ID")),
    responses(
        (status = 200, body = DataEnvelope<Event>),
        (status = 404, body = ErrorEnvelope)
    )
)]
pub(crate) async fn get_event(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        return error_response(StatusCode::BAD_REQUEST, "invalid event id").into_response();
    };
    match with_store(&state, move |telemetry| telemetry.events().get(id)).await {
        Ok(event) => Json(DataEnvelope { data: event }).into_response(),
        Err(err) => map_error(&err, Some(request_id.0)).into_response(),
    }
}

#[utoipa::path(
    get,
    path = "/events",
    params(ListEventsQuery),
    responses((status = 200, body = DataEnvelope<Vec<Event>>))
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ListEventsQuery>,
) -> Response {
    let filter = filter_from_query(&query);
    match with_store(&state, move |telemetry| telemetry.events().list(filter)).await {
        Ok(events) => Json(DataEnvelope { data: events }).into_response(),
        Err(err) => map_error(&err, Some(request_id.0)).into_response(),
    }
}

fn filter_from_query(query: &ListEventsQuery) -> EventFilter {
    EventFilter {
        event_name: query.event_name.clone().filter(|name| !name.is_empty()),
        from: query.from.as_deref().and_then(parse_rfc3339),
        to: query.to.as_deref().and_then(parse_rfc3339),
        limit: query
            .limit
            .as_deref()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(0),
        offset: query
            .offset
            .as_deref()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|value| *value >= 0)
            .unwrap_or(0),
    }
}

pub(crate) fn parse_rfc3339(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
