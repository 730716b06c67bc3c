//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the to-do list.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes afterwards.
//! - `completed` starts as `false`.
//! - `text` is expected to be non-empty, but the model does not enforce it;
//!   see `service::editor` for the boundary that does.

use serde::{Deserialize, Serialize};

/// Store-assigned row identifier. Monotonically increasing, never reused.
pub type TaskId = i64;

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Builds a freshly inserted task: incomplete, with the given id.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Returns `true` when `text` would enable the save action.
    pub fn is_valid_text(text: &str) -> bool {
        !text.is_empty()
    }
}
