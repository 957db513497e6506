//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its partial-update patch.
//! - Provide blank-note construction and the demonstration notes.
//!
//! # Invariants
//! - `encrypted` and `on_chain` are display flags only. Nothing in core
//!   encrypts content or writes to a ledger based on them.
//! - `updated_at` is not bumped by `apply`; callers set it explicitly.

use crate::model::null_as_default;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to notes created from the "new note" action.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled Note";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub encrypted: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub on_chain: bool,
}

impl Note {
    /// Creates an empty, encrypted, off-chain note stamped with `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        let stamp = format_timestamp(now);
        Self {
            id: Uuid::new_v4().to_string(),
            title: UNTITLED_NOTE_TITLE.to_string(),
            content: String::new(),
            tags: Vec::new(),
            created_at: stamp.clone(),
            updated_at: stamp,
            encrypted: true,
            on_chain: false,
        }
    }

    /// Case-insensitive substring match against the title or any tag.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Merges every field set on `patch`. Returns whether anything changed.
    pub fn apply(&mut self, patch: &NotePatch) -> bool {
        let before = self.clone();
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(updated_at) = &patch.updated_at {
            self.updated_at = updated_at.clone();
        }
        if let Some(encrypted) = patch.encrypted {
            self.encrypted = encrypted;
        }
        if let Some(on_chain) = patch.on_chain {
            self.on_chain = on_chain;
        }
        *self != before
    }
}

/// Partial update for a [`Note`]. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub updated_at: Option<String>,
    pub encrypted: Option<bool>,
    pub on_chain: Option<bool>,
}

impl NotePatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Stamps `updated_at` with the given instant.
    pub fn touched_at(mut self, now: DateTime<Utc>) -> Self {
        self.updated_at = Some(format_timestamp(now));
        self
    }

    pub fn encrypted(mut self, encrypted: bool) -> Self {
        self.encrypted = Some(encrypted);
        self
    }

    pub fn on_chain(mut self, on_chain: bool) -> Self {
        self.on_chain = Some(on_chain);
        self
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Demonstration notes shown on first run and after unreadable slot data.
pub fn seed_notes() -> Vec<Note> {
    vec![
        Note {
            id: "1".to_string(),
            title: "DAO Treasury Strategy".to_string(),
            content: "Private notes on treasury management and diversification strategy..."
                .to_string(),
            tags: vec!["Strategy".to_string(), "Finance".to_string()],
            created_at: "2024-12-01".to_string(),
            updated_at: "2024-12-15".to_string(),
            encrypted: true,
            on_chain: true,
        },
        Note {
            id: "2".to_string(),
            title: "Security Audit Findings".to_string(),
            content: "Confidential security review results and recommendations...".to_string(),
            tags: vec!["Security".to_string(), "Critical".to_string()],
            created_at: "2024-12-10".to_string(),
            updated_at: "2024-12-12".to_string(),
            encrypted: true,
            on_chain: false,
        },
    ]
}
