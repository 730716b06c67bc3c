//! Repository layer: the durable task store.
//!
//! # Responsibility
//! - Define the store contract consumed by the list controller and editor.
//! - Keep SQLite query details away from service orchestration.
//!
//! # Invariants
//! - Updates and deletes on a missing id are silent no-ops, not errors.
//! - The store performs no argument validation; callers own that boundary.

pub mod task_repo;
