pub mod envelope;
pub mod middleware;
pub mod openapi;
pub mod routes;

use axum::Router;
use pulse_core::{Telemetry, TelemetryError};
use pulse_db::DbStore;
use pulse_db::schema;
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    pub db_path: String,
    pub request_timeout: Duration,
}

pub fn build_telemetry(db_path: &str) -> Result<Telemetry<DbStore>, TelemetryError> {
    let conn = schema::open_and_migrate(db_path).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    Ok(Telemetry::new(DbStore::new(conn)))
}

// Runs the blocking store call off the async runtime and bounds it with the
// request deadline. On expiry only the response is abandoned; the SQLite call
// itself cannot be interrupted and finishes in the background.
pub(crate) async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, TelemetryError>
where
    F: FnOnce(&Telemetry<DbStore>) -> Result<T, TelemetryError> + Send + 'static,
    T: Send + 'static,
{
    let db_path = state.db_path.clone();
    let task = tokio::task::spawn_blocking(move || {
        let telemetry = build_telemetry(&db_path)?;
        f(&telemetry)
    });
    match tokio::time::timeout(state.request_timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => Err(TelemetryError::Storage {
            message: err.to_string(),
        }),
        Err(_) => Err(TelemetryError::Cancelled {
            message: "request deadline exceeded".to_string(),
        }),
    }
}

pub fn app(state: AppState) -> Router {
    routes::router(state)
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> Result<(), std::io::Error> {
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
