//! Key-value slot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide a string key/value persistence contract for the stores.
//! - Own JSON encoding of whole collections/records into slots.
//!
//! # Invariants
//! - A slot holding an empty string is reported as absent.
//! - `set_slot` replaces the whole value; there are no partial writes.
//! - Unreadable JSON is surfaced as `SlotRead::Malformed`, never as an error.

use crate::db::DbError;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known slot keys.
pub mod keys {
    /// Current task collection slot.
    pub const TASKS: &str = "arcOS-tasks";
    /// Task slots written by earlier releases, consulted in this order.
    pub const LEGACY_TASKS: [&str; 2] = ["kanban-tasks", "arc-tasks"];
    pub const NOTES: &str = "encrypted-notes";
    pub const WORKSPACE: &str = "workspace-data";
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for slot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialize(serde_json::Error),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode slot value: {err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Repository interface for named value slots.
pub trait SlotRepository {
    /// Returns the stored value, or `None` when absent or empty.
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Inserts or replaces the value stored under `key`.
    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Deletes `key`. Removing an absent key is not an error.
    fn remove_slot(&self, key: &str) -> RepoResult<()>;
    /// Lists all stored keys sorted ascending.
    fn list_slot_keys(&self) -> RepoResult<Vec<String>>;
}

impl<T: SlotRepository + ?Sized> SlotRepository for &T {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get_slot(key)
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).set_slot(key, value)
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        (**self).remove_slot(key)
    }

    fn list_slot_keys(&self) -> RepoResult<Vec<String>> {
        (**self).list_slot_keys()
    }
}

/// SQLite-backed slot repository.
#[derive(Debug, Clone, Copy)]
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the `slots` table has not been created.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'slots'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("slots"));
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value.filter(|value| !value.is_empty()))
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM slots WHERE key = ?1;", [key])?;
        Ok(())
    }

    fn list_slot_keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM slots ORDER BY key ASC;")?;
        let mut rows = stmt.query([])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get(0)?);
        }
        Ok(keys)
    }
}

/// In-process slot repository.
///
/// Single-threaded by construction; share it between stores by reference.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: RefCell<BTreeMap<String, String>>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository pre-populated with `entries`.
    pub fn with_slots<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let slots = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self {
            slots: RefCell::new(slots),
        }
    }
}

impl SlotRepository for MemorySlotRepository {
    fn get_slot(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self
            .slots
            .borrow()
            .get(key)
            .filter(|value| !value.is_empty())
            .cloned())
    }

    fn set_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, key: &str) -> RepoResult<()> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }

    fn list_slot_keys(&self) -> RepoResult<Vec<String>> {
        Ok(self.slots.borrow().keys().cloned().collect())
    }
}

/// Outcome of decoding one slot.
#[derive(Debug)]
pub enum SlotRead<T> {
    /// Nothing stored under the key.
    Missing,
    Parsed(T),
    /// Stored text is not valid JSON for `T`.
    Malformed(serde_json::Error),
}

/// Decodes the JSON value stored under `key`.
pub fn read_json<T, R>(repo: &R, key: &str) -> RepoResult<SlotRead<T>>
where
    T: DeserializeOwned,
    R: SlotRepository + ?Sized,
{
    let Some(raw) = repo.get_slot(key)? else {
        return Ok(SlotRead::Missing);
    };
    Ok(match serde_json::from_str(&raw) {
        Ok(value) => SlotRead::Parsed(value),
        Err(err) => SlotRead::Malformed(err),
    })
}

/// Encodes `value` as JSON and replaces the slot under `key`.
pub fn write_json<T, R>(repo: &R, key: &str, value: &T) -> RepoResult<()>
where
    T: Serialize + ?Sized,
    R: SlotRepository + ?Sized,
{
    let encoded = serde_json::to_string(value)?;
    match repo.set_slot(key, &encoded) {
        Ok(()) => {
            debug!(
                "event=slot_write module=repo status=ok key={} bytes={}",
                key,
                encoded.len()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=slot_write module=repo status=error key={} error={}",
                key, err
            );
            Err(err)
        }
    }
}
