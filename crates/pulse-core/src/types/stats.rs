use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EventStats {
    pub bucket: DateTime<Utc>,
    pub event_name: String,
    pub event_count: i64,
    pub unique_users: i64,
}
