//! SQLite connection wrapper (lightweight for CLI usage), carrying the
//! change feed that write paths publish to.

use crate::core::changes::{ChangeEvent, ChangeFeed, Table};
use rusqlite::{Connection, Result};
use std::path::Path;

pub struct DbPool {
    pub conn: Connection,
    pub feed: ChangeFeed,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Ok(Self {
            conn,
            feed: ChangeFeed::new(),
        })
    }

    /// In-memory database, used by library callers that do not need a file.
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            feed: ChangeFeed::new(),
        })
    }

    /// Publish a committed change to every subscriber.
    pub fn notify(&self, table: Table, employee_id: Option<&str>) {
        self.feed.publish(&ChangeEvent::new(table, employee_id));
    }
}
