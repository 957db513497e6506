//! Domain model for the dashboard stores.
//!
//! # Responsibility
//! - Define the task, note and workspace records persisted in slots.
//! - Own the demonstration seed data used on first run or fallback.
//!
//! # Invariants
//! - Serialized field names are camelCase, matching existing slot contents.
//! - Ids are opaque strings; the owning store rejects duplicates.
//! - Apart from ids, a field that is missing or `null` in stored JSON reads
//!   as its default instead of failing the whole collection.

use serde::{Deserialize, Deserializer};

pub mod note;
pub mod task;
pub mod workspace;

/// Reads `null` as `T::default()`. Pair with `#[serde(default)]` so a
/// missing field behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
