use crate::util::{from_rfc3339, to_rfc3339};
use chrono::{DateTime, Utc};
use pulse_core::analytics::AnalyticsRepository;
use pulse_core::error::TelemetryError;
use pulse_core::types::EventStats;
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

pub struct AnalyticsRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> AnalyticsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> AnalyticsRepository for AnalyticsRepo<'a> {
    fn hourly_stats(
        &self,
        event_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventStats>, TelemetryError> {
        query_stats(self.conn, "events_hourly", event_name, from, to)
    }

    fn daily_stats(
        &self,
        event_name: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<EventStats>, TelemetryError> {
        query_stats(self.conn, "events_daily", event_name, from, to)
    }
}

fn query_stats(
    conn: &Connection,
    view: &str,
    event_name: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<EventStats>, TelemetryError> {
    let mut sql = format!(
        "SELECT bucket, event_name, event_count, unique_users FROM {view} WHERE bucket >= ? AND bucket <= ?"
    );
    let mut params: Vec<Value> = vec![
        Value::Text(to_rfc3339(&from)),
        Value::Text(to_rfc3339(&to)),
    ];
    if !event_name.is_empty() {
        sql.push_str(" AND event_name = ?");
        params.push(Value::Text(event_name.to_string()));
    }
    sql.push_str(" ORDER BY bucket DESC");

    let mut stmt = conn.prepare(&sql).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let mut rows = stmt
        .query(params_from_iter(params))
        .map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?;
    let mut stats = Vec::new();
    while let Some(row) = rows.next().map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })? {
        stats.push(map_stats_row(row)?);
    }
    Ok(stats)
}

fn map_stats_row(row: &rusqlite::Row<'_>) -> Result<EventStats, TelemetryError> {
    let bucket: String = row.get(0).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let event_name: String = row.get(1).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let event_count: i64 = row.get(2).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let unique_users: i64 = row.get(3).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;

    Ok(EventStats {
        bucket: from_rfc3339(&bucket).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?,
        event_name,
        event_count,
        unique_users,
    })
}
