//! Task board store.
//!
//! # Responsibility
//! - Hold the ordered task collection in memory.
//! - Mirror the full collection into the task slot after every mutation.
//! - Migrate task data from legacy slot names on first load.
//!
//! # Invariants
//! - Task order is board order; `create` appends and `reorder` moves.
//! - An empty collection is never written, so a fresh store cannot clobber
//!   persisted data it has not loaded.
//! - Ids are unique within the collection; duplicates are rejected on
//!   insert and dropped on load or replace.
//! - Unknown ids are ignored: mutations report `Ok(false)`.

use crate::model::task::{seed_tasks, Task, TaskPatch};
use crate::repo::slot_repo::{keys, read_json, write_json, RepoResult, SlotRead, SlotRepository};
use log::{debug, info, warn};
use std::collections::HashSet;

/// In-memory task collection backed by a slot repository.
#[derive(Debug)]
pub struct TaskStore<R: SlotRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: SlotRepository> TaskStore<R> {
    /// Loads the task collection.
    ///
    /// Resolution order:
    /// 1. the current slot;
    /// 2. the first non-empty legacy slot, copied forward, after which every
    ///    legacy slot is removed;
    /// 3. the demonstration board.
    ///
    /// Seeds and slot data are written back to the current slot. Unparseable
    /// slot data is logged and replaced in memory by the demonstration board,
    /// but the stored text is left in place until the next mutation. Later
    /// records repeating an earlier id are dropped.
    ///
    /// # Errors
    /// - Returns `RepoError` when the underlying storage fails.
    pub fn load(repo: R) -> RepoResult<Self> {
        let (tasks, from_fallback) = load_tasks(&repo)?;
        let store = Self {
            repo,
            tasks: dedup_by_id(tasks),
        };
        if !from_fallback {
            store.persist()?;
        }
        Ok(store)
    }

    /// Current collection in board order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Tasks whose `column_id` equals `column_id`, in board order.
    pub fn in_column<'a>(&'a self, column_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks
            .iter()
            .filter(move |task| task.column_id == column_id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends `task` to the end of the board.
    ///
    /// Returns `false` without changing anything when the id is taken.
    pub fn create(&mut self, task: Task) -> RepoResult<bool> {
        if self.get(&task.id).is_some() {
            warn!(
                "event=task_create module=tasks status=rejected reason=duplicate_id id={}",
                task.id
            );
            return Ok(false);
        }
        self.tasks.push(task);
        self.persist()?;
        Ok(true)
    }

    /// Appends several tasks, keeping their relative order.
    ///
    /// Tasks whose id is already on the board are skipped. Returns how many
    /// were appended.
    pub fn add_tasks(&mut self, tasks: impl IntoIterator<Item = Task>) -> RepoResult<usize> {
        let mut added = 0;
        for task in tasks {
            if self.get(&task.id).is_some() {
                warn!(
                    "event=task_create module=tasks status=rejected reason=duplicate_id id={}",
                    task.id
                );
                continue;
            }
            self.tasks.push(task);
            added += 1;
        }
        self.persist()?;
        Ok(added)
    }

    /// Replaces the whole collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, tasks: Vec<Task>) -> RepoResult<()> {
        self.tasks = dedup_by_id(tasks);
        self.persist()
    }

    /// Merges `patch` into the task with `id`.
    ///
    /// Returns whether a matching task was found.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> RepoResult<bool> {
        let found = match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.apply(patch);
                true
            }
            None => false,
        };
        self.persist()?;
        Ok(found)
    }

    /// Removes the task with `id`. Returns whether one was removed.
    pub fn delete(&mut self, id: &str) -> RepoResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Moves the task at `from` so it ends up at index `to`.
    ///
    /// Neighbours shift to make room. An out-of-range `from` is ignored and a
    /// `to` past the end places the task last. Returns whether a task moved.
    pub fn reorder(&mut self, from: usize, to: usize) -> RepoResult<bool> {
        if from >= self.tasks.len() {
            return Ok(false);
        }
        let task = self.tasks.remove(from);
        let to = to.min(self.tasks.len());
        self.tasks.insert(to, task);
        self.persist()?;
        Ok(from != to)
    }

    /// Adds `tag` to the task with `id` unless already present.
    ///
    /// Returns whether the tag set changed.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> RepoResult<bool> {
        let added = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .is_some_and(|task| task.add_tag(tag));
        self.persist()?;
        Ok(added)
    }

    /// Gives the store's repository back, dropping the in-memory collection.
    pub fn into_repo(self) -> R {
        self.repo
    }

    fn persist(&self) -> RepoResult<()> {
        if self.tasks.is_empty() {
            debug!("event=slot_write module=tasks status=skipped reason=empty_collection");
            return Ok(());
        }
        write_json(&self.repo, keys::TASKS, &self.tasks)
    }
}

/// Returns the loaded tasks and whether they are a fallback for unreadable
/// slot data.
fn load_tasks<R: SlotRepository>(repo: &R) -> RepoResult<(Vec<Task>, bool)> {
    if repo.get_slot(keys::TASKS)?.is_none() {
        migrate_legacy_slots(repo)?;
    }

    match read_json::<Vec<Task>, _>(repo, keys::TASKS)? {
        SlotRead::Parsed(tasks) => {
            info!(
                "event=slot_load module=tasks status=ok source=slot count={}",
                tasks.len()
            );
            Ok((tasks, false))
        }
        SlotRead::Missing => {
            info!("event=slot_load module=tasks status=ok source=seed");
            Ok((seed_tasks(), false))
        }
        SlotRead::Malformed(err) => {
            warn!(
                "event=slot_parse module=tasks status=fallback key={} error={}",
                keys::TASKS,
                err
            );
            Ok((seed_tasks(), true))
        }
    }
}

fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    let before = tasks.len();
    let unique: Vec<Task> = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect();
    if unique.len() != before {
        warn!(
            "event=task_dedup module=tasks status=ok dropped={}",
            before - unique.len()
        );
    }
    unique
}

fn migrate_legacy_slots<R: SlotRepository>(repo: &R) -> RepoResult<()> {
    let mut legacy = None;
    for key in keys::LEGACY_TASKS {
        if let Some(value) = repo.get_slot(key)? {
            legacy = Some((key, value));
            break;
        }
    }

    let Some((from_key, value)) = legacy else {
        return Ok(());
    };

    repo.set_slot(keys::TASKS, &value)?;
    for key in keys::LEGACY_TASKS {
        repo.remove_slot(key)?;
    }
    info!(
        "event=slot_migrate module=tasks status=ok from={} to={}",
        from_key,
        keys::TASKS
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::task::Task;
    use crate::repo::slot_repo::{keys, MemorySlotRepository, SlotRepository};

    fn store_with(tasks: &[Task]) -> (MemorySlotRepository, String) {
        let json = serde_json::to_string(tasks).unwrap();
        (MemorySlotRepository::with_slots([(keys::TASKS, json.clone())]), json)
    }

    #[test]
    fn reorder_moves_forward_and_backward() {
        let tasks: Vec<Task> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| Task::with_id(*id, "todo", *id))
            .collect();
        let (repo, _) = store_with(&tasks);
        let mut store = TaskStore::load(&repo).unwrap();

        assert!(store.reorder(0, 2).unwrap());
        let ids: Vec<_> = store.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a", "d"]);

        assert!(store.reorder(3, 0).unwrap());
        let ids: Vec<_> = store.tasks().iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids, ["d", "b", "c", "a"]);
    }

    #[test]
    fn reorder_guards_out_of_range_indices() {
        let tasks = vec![Task::with_id("a", "todo", "a"), Task::with_id("b", "todo", "b")];
        let (repo, _) = store_with(&tasks);
        let mut store = TaskStore::load(&repo).unwrap();

        assert!(!store.reorder(5, 0).unwrap());
        assert_eq!(store.tasks(), tasks.as_slice());

        assert!(store.reorder(0, 99).unwrap());
        assert_eq!(store.tasks()[1].id, "a");
    }

    #[test]
    fn deleting_last_task_leaves_slot_untouched() {
        let tasks = vec![Task::with_id("only", "todo", "x")];
        let (repo, json) = store_with(&tasks);
        let mut store = TaskStore::load(&repo).unwrap();

        assert!(store.delete("only").unwrap());
        assert!(store.is_empty());
        assert_eq!(repo.get_slot(keys::TASKS).unwrap(), Some(json));
    }

    #[test]
    fn duplicate_ids_in_slot_keep_first_record() {
        let tasks = vec![
            Task::with_id("a", "todo", "first"),
            Task::with_id("a", "done", "second"),
            Task::with_id("b", "todo", "b"),
        ];
        let (repo, _) = store_with(&tasks);
        let store = TaskStore::load(&repo).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().content, "first");
    }

    #[test]
    fn in_column_filters_in_board_order() {
        let repo = MemorySlotRepository::new();
        let store = TaskStore::load(&repo).unwrap();
        let bounties: Vec<_> = store.in_column("bounty").map(|task| task.id.as_str()).collect();
        assert_eq!(bounties, ["2", "7"]);
    }
}
