use crate::util::{decode_json, encode_json, from_rfc3339, to_rfc3339};
use chrono::Utc;
use pulse_core::error::TelemetryError;
use pulse_core::events::EventRepository;
use pulse_core::types::{Event, EventFilter, NewEvent};
use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

pub struct EventRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> EventRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl<'a> EventRepository for EventRepo<'a> {
    fn create(&self, event: NewEvent) -> Result<Event, TelemetryError> {
        let created_at = Utc::now();
        let payload_json = encode_json(&event.payload).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?;
        let sql =
            "INSERT INTO events (event_name, timestamp, payload, created_at) VALUES (?1, ?2, ?3, ?4)";
        let params = (
            event.event_name.as_str(),
            to_rfc3339(&event.timestamp),
            payload_json,
            to_rfc3339(&created_at),
        );
        self.conn
            .execute(sql, params)
            .map_err(|err| TelemetryError::Storage {
                message: err.to_string(),
            })?;
        Ok(Event {
            id: self.conn.last_insert_rowid(),
            event_name: event.event_name,
            timestamp: event.timestamp,
            payload: event.payload,
            created_at,
        })
    }

    fn get_by_id(&self, id: i64) -> Result<Option<Event>, TelemetryError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, event_name, timestamp, payload, created_at FROM events WHERE id = ?1",
            )
            .map_err(|err| TelemetryError::Storage {
                message: err.to_string(),
            })?;
        let mut rows = stmt.query([id]).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?;
        match rows.next().map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })? {
            Some(row) => Ok(Some(map_event_row(row)?)),
            None => Ok(None),
        }
    }

    fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, TelemetryError> {
        let mut sql =
            "SELECT id, event_name, timestamp, payload, created_at FROM events WHERE 1=1"
                .to_string();
        let mut params: Vec<Value> = Vec::new();
        if let Some(event_name) = filter.event_name.as_deref() {
            if !event_name.is_empty() {
                sql.push_str(" AND event_name = ?");
                params.push(Value::Text(event_name.to_string()));
            }
        }
        if let Some(from) = filter.from {
            sql.push_str(" AND timestamp >= ?");
            params.push(Value::Text(to_rfc3339(&from)));
        }
        if let Some(to) = filter.to {
            sql.push_str(" AND timestamp <= ?");
            params.push(Value::Text(to_rfc3339(&to)));
        }
        sql.push_str(" ORDER BY timestamp DESC");
        if filter.limit > 0 {
            sql.push_str(" LIMIT ?");
            params.push(Value::Integer(filter.limit));
        }
        if filter.offset > 0 {
            sql.push_str(" OFFSET ?");
            params.push(Value::Integer(filter.offset));
        }

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|err| TelemetryError::Storage {
                message: err.to_string(),
            })?;
        let mut rows =
            stmt.query(params_from_iter(params))
                .map_err(|err| TelemetryError::Storage {
                    message: err.to_string(),
                })?;
        let mut events = Vec::new();
        while let Some(row) = rows.next().map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })? {
            events.push(map_event_row(row)?);
        }
        Ok(events)
    }
}

fn map_event_row(row: &rusqlite::Row<'_>) -> Result<Event, TelemetryError> {
    let id: i64 = row.get(0).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let event_name: String = row.get(1).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let timestamp: String = row.get(2).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let payload: String = row.get(3).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;
    let created_at: String = row.get(4).map_err(|err| TelemetryError::Storage {
        message: err.to_string(),
    })?;

    Ok(Event {
        id,
        event_name,
        timestamp: from_rfc3339(&timestamp).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?,
        payload: decode_json(&payload).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?,
        created_at: from_rfc3339(&created_at).map_err(|err| TelemetryError::Storage {
            message: err.to_string(),
        })?,
    })
}
