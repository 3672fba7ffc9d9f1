use crate::analytics::AnalyticsRepository;
use crate::events::EventRepository;

pub trait Store {
    type Events<'a>: EventRepository
    where
        Self: 'a;
    type Analytics<'a>: AnalyticsRepository
    where
        Self: 'a;

    fn events(&self) -> Self::Events<'_>;
    fn analytics(&self) -> Self::Analytics<'_>;
}
