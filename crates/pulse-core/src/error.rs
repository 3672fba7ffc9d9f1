use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid event: {message}")]
    InvalidEvent { message: String },
    #[error("event not found")]
    NotFound,
    #[error("storage failure: {message}")]
    Storage { message: String },
    #[error("cancelled: {message}")]
    Cancelled { message: String },
}
