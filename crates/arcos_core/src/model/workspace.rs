//! Workspace metadata record.
//!
//! All fields are display strings; nothing is parsed or validated.

use crate::model::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkspaceMetadata {
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub active_tasks: String,
    #[serde(deserialize_with = "null_as_default")]
    pub team_members: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completion: String,
    #[serde(deserialize_with = "null_as_default")]
    pub days_active: String,
}

impl WorkspaceMetadata {
    /// Returns whether any field holds text.
    pub fn has_data(&self) -> bool {
        [
            &self.description,
            &self.active_tasks,
            &self.team_members,
            &self.completion,
            &self.days_active,
        ]
        .iter()
        .any(|value| !value.is_empty())
    }
}
