use std::path::Path;

use rusqlite::Connection;

mod blocked;
mod bookings;
mod error;
mod helpers;
mod migrations;
mod overrides;
mod properties;
mod settings;

pub use error::{DbError, Result};

/// Handle over the calendar store: properties, overrides, blocked dates and
/// bookings, keyed by (property, date) or (property, id).
pub struct Db {
    pub(crate) conn: Connection,
}

impl Db {
    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Db { conn })
    }
}
