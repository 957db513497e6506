//! Dashboard database file.
//!
//! The dashboard keeps every persisted value in one `slots` table; this
//! module owns getting a connection to that table into a usable state.
//!
//! # Invariants
//! - Schema revision lives in `PRAGMA user_version`.
//! - A file written by a newer build is refused rather than downgraded.
//! - Slot reads and writes only happen on connections returned from here.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the slot database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file's schema revision is ahead of what this build knows.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Whether the failure is a schema revision mismatch rather than I/O.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, Self::SchemaTooNew { .. })
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "slot database was written by a newer build (schema {found}, this build reads up to {supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
