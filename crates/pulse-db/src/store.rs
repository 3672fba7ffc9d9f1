use pulse_core::store::Store;
use rusqlite::Connection;

use crate::analytics_repo::AnalyticsRepo;
use crate::event_repo::EventRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Store for DbStore {
    type Events<'a>
        = EventRepo<'a>
    where
        Self: 'a;
    type Analytics<'a>
        = AnalyticsRepo<'a>
    where
        Self: 'a;

    fn events(&self) -> Self::Events<'_> {
        EventRepo::new(&self.conn)
    }

    fn analytics(&self) -> Self::Analytics<'_> {
        AnalyticsRepo::new(&self.conn)
    }
}
