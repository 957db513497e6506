//! Workspace metadata store.
//!
//! # Responsibility
//! - Load the workspace record once and save it as a single unit.
//! - Keep in-progress edits in a draft separate from the committed record.
//!
//! # Invariants
//! - The committed record only changes through `save` or `commit_draft`.
//! - A save always writes all five fields under one slot key.

use crate::model::workspace::WorkspaceMetadata;
use crate::repo::slot_repo::{keys, read_json, write_json, RepoResult, SlotRead, SlotRepository};
use log::{info, warn};

#[derive(Debug)]
pub struct WorkspaceStore<R: SlotRepository> {
    repo: R,
    committed: WorkspaceMetadata,
    draft: Option<WorkspaceMetadata>,
}

impl<R: SlotRepository> WorkspaceStore<R> {
    /// Loads the workspace record. Absent or unreadable data yields an
    /// empty record; nothing is written back.
    pub fn load(repo: R) -> RepoResult<Self> {
        let committed = match read_json::<WorkspaceMetadata, _>(&repo, keys::WORKSPACE)? {
            SlotRead::Parsed(record) => {
                info!("event=slot_load module=workspace status=ok source=slot");
                record
            }
            SlotRead::Missing => {
                info!("event=slot_load module=workspace status=ok source=default");
                WorkspaceMetadata::default()
            }
            SlotRead::Malformed(err) => {
                warn!(
                    "event=slot_parse module=workspace status=fallback key={} error={}",
                    keys::WORKSPACE,
                    err
                );
                WorkspaceMetadata::default()
            }
        };

        Ok(Self {
            repo,
            committed,
            draft: None,
        })
    }

    pub fn metadata(&self) -> &WorkspaceMetadata {
        &self.committed
    }

    pub fn has_data(&self) -> bool {
        self.committed.has_data()
    }

    /// Writes `record` and makes it the committed record.
    ///
    /// Any open draft is discarded.
    pub fn save(&mut self, record: WorkspaceMetadata) -> RepoResult<()> {
        write_json(&self.repo, keys::WORKSPACE, &record)?;
        info!(
            "event=workspace_save module=workspace status=ok has_data={}",
            record.has_data()
        );
        self.committed = record;
        self.draft = None;
        Ok(())
    }

    /// Opens a draft seeded from the committed record.
    ///
    /// Re-opening while a draft exists keeps the existing draft.
    pub fn begin_edit(&mut self) -> &mut WorkspaceMetadata {
        self.draft.get_or_insert_with(|| self.committed.clone())
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&WorkspaceMetadata> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut WorkspaceMetadata> {
        self.draft.as_mut()
    }

    /// Saves the open draft. Returns `false` when no draft was open.
    pub fn commit_draft(&mut self) -> RepoResult<bool> {
        let Some(draft) = self.draft.take() else {
            return Ok(false);
        };
        if let Err(err) = self.save(draft.clone()) {
            self.draft = Some(draft);
            return Err(err);
        }
        Ok(true)
    }

    /// Drops the open draft without saving.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    pub fn into_repo(self) -> R {
        self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::WorkspaceStore;
    use crate::repo::slot_repo::MemorySlotRepository;

    #[test]
    fn begin_edit_twice_keeps_existing_draft() {
        let repo = MemorySlotRepository::new();
        let mut store = WorkspaceStore::load(&repo).unwrap();
        store.begin_edit().description = "first".to_string();
        assert_eq!(store.begin_edit().description, "first");
    }

    #[test]
    fn commit_without_draft_is_noop() {
        let repo = MemorySlotRepository::new();
        let mut store = WorkspaceStore::load(&repo).unwrap();
        assert!(!store.commit_draft().unwrap());
        assert!(!store.has_data());
    }
}
