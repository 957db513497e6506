//! Core state management for the arcOS dashboard.
//! Owns task, note and workspace records and their slot persistence.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, NotePatch};
pub use model::task::{is_known_column, Task, TaskPatch, KNOWN_COLUMNS};
pub use model::workspace::WorkspaceMetadata;
pub use repo::slot_repo::{
    keys, MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use service::dashboard::Dashboard;
pub use service::note_store::NoteStore;
pub use service::task_store::TaskStore;
pub use service::workspace_store::WorkspaceStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
