pub mod analytics;
pub mod error;
pub mod events;
pub mod store;
pub mod telemetry;

pub mod types;

pub use crate::error::TelemetryError;
pub use crate::store::Store;
pub use crate::telemetry::Telemetry;
