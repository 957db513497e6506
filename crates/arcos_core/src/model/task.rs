//! Task domain model.
//!
//! # Responsibility
//! - Define the kanban task record and its partial-update patch.
//! - Provide the demonstration board used when no task slot exists.
//!
//! # Invariants
//! - `column_id` is never validated; unknown columns are kept verbatim.
//! - `tags` behaves as a set: `add_tag` never introduces duplicates.

use crate::model::null_as_default;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Board columns in display order.
pub const KNOWN_COLUMNS: [&str; 6] = ["backlog", "todo", "inprogress", "review", "done", "bounty"];

/// Returns whether `column_id` names one of the built-in board columns.
pub fn is_known_column(column_id: &str) -> bool {
    KNOWN_COLUMNS.contains(&column_id)
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Workflow stage. Any string is accepted.
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Free-text reward, e.g. `1.5 ETH`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(column_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), column_id, content)
    }

    /// Creates a task with a caller-provided id and no optional fields.
    pub fn with_id(
        id: impl Into<String>,
        column_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            column_id: column_id.into(),
            content: content.into(),
            bounty: None,
            assignee: None,
            tags: Vec::new(),
            due_date: None,
        }
    }

    /// Adds `tag` unless it is already present. Returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|existing| existing == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Merges every field set on `patch` into this task.
    ///
    /// Returns whether any field value actually changed.
    pub fn apply(&mut self, patch: &TaskPatch) -> bool {
        let before = self.clone();
        if let Some(column_id) = &patch.column_id {
            self.column_id = column_id.clone();
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(bounty) = &patch.bounty {
            self.bounty = bounty.clone();
        }
        if let Some(assignee) = &patch.assignee {
            self.assignee = assignee.clone();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(due_date) = &patch.due_date {
            self.due_date = due_date.clone();
        }
        *self != before
    }
}

/// Partial update for a [`Task`].
///
/// Outer `None` leaves a field untouched. For optional fields the inner
/// value replaces the current one, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub column_id: Option<String>,
    pub content: Option<String>,
    pub bounty: Option<Option<String>>,
    pub assignee: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<Option<String>>,
}

impl TaskPatch {
    pub fn column(mut self, column_id: impl Into<String>) -> Self {
        self.column_id = Some(column_id.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn bounty(mut self, bounty: Option<String>) -> Self {
        self.bounty = Some(bounty);
        self
    }

    pub fn assignee(mut self, assignee: Option<String>) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn due_date(mut self, due_date: Option<String>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns whether the patch sets no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Demonstration board shown on first run and after unreadable slot data.
pub fn seed_tasks() -> Vec<Task> {
    fn task(
        id: &str,
        column_id: &str,
        content: &str,
        bounty: Option<&str>,
        assignee: Option<&str>,
        tags: &[&str],
        due_date: &str,
    ) -> Task {
        Task {
            id: id.to_string(),
            column_id: column_id.to_string(),
            content: content.to_string(),
            bounty: bounty.map(str::to_string),
            assignee: assignee.map(str::to_string),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            due_date: Some(due_date.to_string()),
        }
    }

    vec![
        task(
            "1",
            "backlog",
            "Research DAO Governance Models",
            None,
            None,
            &["Research"],
            "2025-12-05",
        ),
        task(
            "2",
            "bounty",
            "Implement Smart Contract Escrow",
            Some("1.5 ETH"),
            None,
            &["Dev", "High Priority"],
            "2025-12-10",
        ),
        task(
            "3",
            "todo",
            "Design Profile Page UI",
            None,
            Some("Alex"),
            &["Design"],
            "2025-12-02",
        ),
        task(
            "4",
            "review",
            "Audit Token Vesting Contract",
            Some("2.0 ETH"),
            Some("0xSafe"),
            &[],
            "2025-12-15",
        ),
        task(
            "5",
            "done",
            "Initial Project Setup",
            None,
            None,
            &[],
            "2025-11-20",
        ),
        task(
            "6",
            "inprogress",
            "Integrate IPFS Storage",
            None,
            Some("Me"),
            &["Dev"],
            "2025-12-08",
        ),
        task(
            "7",
            "bounty",
            "Create Marketing Assets",
            Some("0.2 ETH"),
            None,
            &[],
            "2025-12-12",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{is_known_column, seed_tasks, Task, TaskPatch};
    use std::collections::HashSet;

    #[test]
    fn seed_ids_are_unique_and_columns_known() {
        let seeds = seed_tasks();
        let ids: HashSet<_> = seeds.iter().map(|task| task.id.as_str()).collect();
        assert_eq!(ids.len(), seeds.len());
        assert!(seeds.iter().all(|task| is_known_column(&task.column_id)));
    }

    #[test]
    fn serializes_with_camel_case_and_omits_absent_fields() {
        let task = Task::with_id("1", "todo", "x");
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":"1","columnId":"todo","content":"x"}"#);
    }

    #[test]
    fn deserializes_original_slot_shape() {
        let json = r#"{"id":"2","columnId":"bounty","content":"c","bounty":"1.5 ETH","tags":["Dev"],"dueDate":"2025-12-10"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.bounty.as_deref(), Some("1.5 ETH"));
        assert_eq!(task.tags, vec!["Dev".to_string()]);
        assert_eq!(task.due_date.as_deref(), Some("2025-12-10"));
        assert_eq!(task.assignee, None);
    }

    #[test]
    fn null_and_missing_fields_read_as_defaults() {
        let json = r#"{"id":"b","columnId":"todo","tags":null,"bounty":null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task, Task::with_id("b", "todo", ""));
    }

    #[test]
    fn apply_can_set_and_clear_optional_fields() {
        let mut task = Task::with_id("1", "todo", "x");
        assert!(task.apply(&TaskPatch::default().bounty(Some("1 ETH".to_string()))));
        assert_eq!(task.bounty.as_deref(), Some("1 ETH"));
        assert!(task.apply(&TaskPatch::default().bounty(None)));
        assert_eq!(task.bounty, None);
        assert!(!task.apply(&TaskPatch::default().content("x")));
    }

    #[test]
    fn add_tag_skips_existing_value() {
        let mut task = Task::with_id("1", "todo", "x");
        assert!(task.add_tag("Dev"));
        assert!(!task.add_tag("Dev"));
        assert_eq!(task.tags, vec!["Dev".to_string()]);
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(Task::new("todo", "a").id, Task::new("todo", "a").id);
        assert!(TaskPatch::default().is_empty());
    }
}
