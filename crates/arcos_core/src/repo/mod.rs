//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value slot contract the stores persist through.
//! - Isolate SQLite query details from store/business orchestration.
//!
//! # Invariants
//! - Stores only ever read or write whole serialized values.

pub mod slot_repo;
