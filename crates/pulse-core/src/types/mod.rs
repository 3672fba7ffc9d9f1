pub mod event;
pub mod stats;

pub use event::{CreateEventRequest, Event, EventFilter, NewEvent, Payload};
pub use stats::EventStats;
