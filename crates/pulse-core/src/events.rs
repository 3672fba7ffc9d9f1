use crate::error::TelemetryError;
use crate::types::{Event, EventFilter, NewEvent};

pub trait EventRepository {
    fn create(&self, event: NewEvent) -> Result<Event, TelemetryError>;
    fn get_by_id(&self, id: i64) -> Result<Option<Event>, TelemetryError>;
    fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, TelemetryError>;
}
