use crate::error::TelemetryError;
use crate::types::EventStats;
use chrono::{DateTime, Utc};

pub trait AnalyticsRepository {
    fn hourly_stats(
        &self,
        event_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventStats>, TelemetryError>;

    fn daily_stats(
        &self,
        event_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventStats>, TelemetryError>;
}
