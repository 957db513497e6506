//! Note store.
//!
//! # Responsibility
//! - Hold the ordered note collection and the current editor selection.
//! - Mirror the full collection into the note slot after every mutation.
//! - Answer title/tag searches without touching the collection.
//!
//! # Invariants
//! - New notes are inserted at the front and become the selection.
//! - The selection always names a note that exists, or nothing.
//! - An empty collection is never written.

use crate::model::note::{seed_notes, Note, NotePatch};
use crate::repo::slot_repo::{keys, read_json, write_json, RepoResult, SlotRead, SlotRepository};
use chrono::Utc;
use log::{debug, info, warn};
use std::collections::HashSet;

/// In-memory note collection backed by a slot repository.
#[derive(Debug)]
pub struct NoteStore<R: SlotRepository> {
    repo: R,
    notes: Vec<Note>,
    selected: Option<String>,
}

impl<R: SlotRepository> NoteStore<R> {
    /// Loads notes from the note slot, falling back to the demonstration
    /// notes when the slot is absent or unreadable.
    ///
    /// Unreadable slot text is left in place until the next mutation. Later
    /// records repeating an earlier id are dropped.
    ///
    /// # Errors
    /// - Returns `RepoError` when the underlying storage fails.
    pub fn load(repo: R) -> RepoResult<Self> {
        let (notes, from_fallback) = match read_json::<Vec<Note>, _>(&repo, keys::NOTES)? {
            SlotRead::Parsed(notes) => {
                info!(
                    "event=slot_load module=notes status=ok source=slot count={}",
                    notes.len()
                );
                (notes, false)
            }
            SlotRead::Missing => {
                info!("event=slot_load module=notes status=ok source=seed");
                (seed_notes(), false)
            }
            SlotRead::Malformed(err) => {
                warn!(
                    "event=slot_parse module=notes status=fallback key={} error={}",
                    keys::NOTES,
                    err
                );
                (seed_notes(), true)
            }
        };

        let mut seen = HashSet::new();
        let notes: Vec<Note> = notes
            .into_iter()
            .filter(|note| seen.insert(note.id.clone()))
            .collect();

        let store = Self {
            repo,
            notes,
            selected: None,
        };
        if !from_fallback {
            store.persist()?;
        }
        Ok(store)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Note currently open in the editor.
    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Opens the note with `id` in the editor. Returns whether it exists.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Inserts a blank encrypted note at the front and selects it.
    ///
    /// Returns the new note's id.
    pub fn create(&mut self) -> RepoResult<String> {
        let note = Note::blank(Utc::now());
        let id = note.id.clone();
        self.notes.insert(0, note);
        self.selected = Some(id.clone());
        self.persist()?;
        Ok(id)
    }

    /// Merges `patch` into the note with `id`. Returns whether it exists.
    pub fn update(&mut self, id: &str, patch: &NotePatch) -> RepoResult<bool> {
        let found = self.with_note(id, |note| {
            note.apply(patch);
        });
        self.persist()?;
        Ok(found)
    }

    /// Removes the note with `id`, clearing the selection if it was open.
    pub fn delete(&mut self, id: &str) -> RepoResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        let removed = self.notes.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Appends `tag` to the note's tag list.
    ///
    /// Empty input is ignored. Returns whether the tag list changed.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> RepoResult<bool> {
        if tag.is_empty() {
            return Ok(false);
        }
        let found = self.with_note(id, |note| note.tags.push(tag.to_string()));
        self.persist()?;
        Ok(found)
    }

    /// Removes the tag at `index` from the note's tag list.
    pub fn remove_tag_at(&mut self, id: &str, index: usize) -> RepoResult<bool> {
        let mut removed = false;
        self.with_note(id, |note| {
            if index < note.tags.len() {
                note.tags.remove(index);
                removed = true;
            }
        });
        self.persist()?;
        Ok(removed)
    }

    /// Notes whose title or any tag contains `query`, ignoring case.
    ///
    /// An empty query matches every note. Order follows the collection.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let needle = query.to_lowercase();
        self.notes
            .iter()
            .filter(|note| note.matches_lowercase(&needle))
            .collect()
    }

    pub fn into_repo(self) -> R {
        self.repo
    }

    fn with_note(&mut self, id: &str, edit: impl FnOnce(&mut Note)) -> bool {
        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                edit(note);
                true
            }
            None => false,
        }
    }

    fn persist(&self) -> RepoResult<()> {
        if self.notes.is_empty() {
            debug!("event=slot_write module=notes status=skipped reason=empty_collection");
            return Ok(());
        }
        write_json(&self.repo, keys::NOTES, &self.notes)
    }
}
