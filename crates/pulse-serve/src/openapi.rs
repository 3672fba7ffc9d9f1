use utoipa::OpenApi;

use crate::envelope::{DataEnvelope, ErrorEnvelope};
use crate::routes::events::ListEventsQuery;
use crate::routes::health::HealthStatus;
use crate::routes::stats::StatsQuery;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pulse_core::types::{CreateEventRequest, Event, EventStats};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::events::create_event,
        crate::routes::events::get_event,
        crate::routes::events::list_events,
        crate::routes::stats::hourly_stats,
        crate::routes::stats::daily_stats
    ),
    components(schemas(
        Event,
        EventStats,
        CreateEventRequest,
        HealthStatus,
        ListEventsQuery,
        StatsQuery,
        ErrorEnvelope,
        DataEnvelope<Event>,
        DataEnvelope<Vec<Event>>,
        DataEnvelope<Vec<EventStats>>,
        DataEnvelope<HealthStatus>
    ))
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn ensure_initialized() {
    let _ = ApiDoc::openapi();
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> impl IntoResponse {
    let html = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Pulse API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#;
    axum::response::Html(html)
}
