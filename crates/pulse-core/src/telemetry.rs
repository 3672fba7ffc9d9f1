use crate::analytics::AnalyticsRepository;
use crate::error::TelemetryError;
use crate::events::EventRepository;
use crate::store::Store;
use crate::types::{CreateEventRequest, Event, EventFilter, EventStats, NewEvent};
use chrono::{DateTime, Duration, Utc};

const DEFAULT_LIST_LIMIT: i64 = 100;
const MAX_LIST_LIMIT: i64 = 1000;

pub struct Telemetry<S: Store> {
    store: S,
}

impl<S: Store> Telemetry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn events(&self) -> EventsApi<'_, S> {
        EventsApi { core: self }
    }

    pub fn analytics(&self) -> AnalyticsApi<'_, S> {
        AnalyticsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct EventsApi<'a, S: Store> {
    core: &'a Telemetry<S>,
}

impl<'a, S: Store> EventsApi<'a, S> {
    pub fn create(&self, input: CreateEventRequest) -> Result<Event, TelemetryError> {
        if input.event_name.is_empty() {
            return Err(TelemetryError::InvalidEvent {
                message: "event_name is required".to_string(),
            });
        }
        let event = NewEvent {
            event_name: input.event_name,
            timestamp: input.timestamp.unwrap_or_else(Utc::now),
            payload: input.payload,
        };
        self.core.store.events().create(event)
    }

    pub fn get(&self, id: i64) -> Result<Event, TelemetryError> {
        self.core
            .store
            .events()
            .get_by_id(id)?
            .ok_or(TelemetryError::NotFound)
    }

    pub fn list(&self, mut filter: EventFilter) -> Result<Vec<Event>, TelemetryError> {
        if filter.limit <= 0 {
            filter.limit = DEFAULT_LIST_LIMIT;
        }
        if filter.limit > MAX_LIST_LIMIT {
            filter.limit = MAX_LIST_LIMIT;
        }
        self.core.store.events().list(&filter)
    }
}

pub struct AnalyticsApi<'a, S: Store> {
    core: &'a Telemetry<S>,
}

impl<'a, S: Store> AnalyticsApi<'a, S> {
    pub fn hourly(
        &self,
        event_name: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventStats>, TelemetryError> {
        let from = from.unwrap_or_else(|| Utc::now() - Duration::hours(24));
        let to = to.unwrap_or_else(Utc::now);
        self.core
            .store
            .analytics()
            .hourly_stats(event_name, from, to)
            .inspect_err(|err| tracing::error!(error = %err, "hourly stats query failed"))
    }

    pub fn daily(
        &self,
        event_name: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventStats>, TelemetryError> {
        let from = from.unwrap_or_else(|| Utc::now() - Duration::days(30));
        let to = to.unwrap_or_else(Utc::now);
        self.core
            .store
            .analytics()
            .daily_stats(event_name, from, to)
            .inspect_err(|err| tracing::error!(error = %err, "daily stats query failed"))
    }
}
