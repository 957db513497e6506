//! Dashboard composition root.
//!
//! # Responsibility
//! - Construct the three stores over one slot repository at startup.
//! - Give callers a single owned object instead of ambient globals.

use crate::repo::slot_repo::{RepoResult, SlotRepository};
use crate::service::note_store::NoteStore;
use crate::service::task_store::TaskStore;
use crate::service::workspace_store::WorkspaceStore;
use log::info;

/// All dashboard stores sharing one repository handle.
#[derive(Debug)]
pub struct Dashboard<R: SlotRepository + Clone> {
    pub tasks: TaskStore<R>,
    pub notes: NoteStore<R>,
    pub workspace: WorkspaceStore<R>,
}

impl<R: SlotRepository + Clone> Dashboard<R> {
    /// Loads every store from `repo`.
    ///
    /// # Errors
    /// - Returns the first storage failure; parse failures fall back inside
    ///   each store and do not fail the open.
    pub fn open(repo: R) -> RepoResult<Self> {
        let tasks = TaskStore::load(repo.clone())?;
        let notes = NoteStore::load(repo.clone())?;
        let workspace = WorkspaceStore::load(repo)?;
        info!(
            "event=dashboard_open module=service status=ok tasks={} notes={} workspace_has_data={}",
            tasks.len(),
            notes.notes().len(),
            workspace.has_data()
        );
        Ok(Self {
            tasks,
            notes,
            workspace,
        })
    }
}
