//! Dashboard stores.
//!
//! # Responsibility
//! - Apply UI-level mutations to in-memory collections.
//! - Persist each collection wholesale through a `SlotRepository`.
//!
//! # Invariants
//! - Stores never issue SQL; storage stays behind the repository trait.

pub mod dashboard;
pub mod note_store;
pub mod task_store;
pub mod workspace_store;
