pub mod error;
pub mod events;
pub mod health;
pub mod stats;

use crate::middleware::request_id::request_id_middleware;
use crate::{AppState, openapi};
use axum::Router;
use axum::middleware;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(events::router(state.clone()))
        .merge(stats::router(state))
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .route_layer(middleware::from_fn(request_id_middleware))
}
