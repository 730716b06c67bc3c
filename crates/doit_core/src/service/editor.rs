//! Add/edit draft for a single task.
//!
//! # Responsibility
//! - Hold the text being typed and whether saving is allowed.
//! - Hand validated text to the owner, which writes it through the list.
//!
//! # Invariants
//! - Save is enabled iff the draft text is non-empty; this is the boundary
//!   that keeps empty tasks out of the store.
//! - Update mode targets a task id, not a list index, so the draft stays
//!   valid while the list changes underneath it.

use crate::model::task::{Task, TaskId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// What saving the draft will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Update { id: TaskId },
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Created(TaskId),
    Updated(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// Save was requested while the draft is empty.
    EmptyText,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text must not be empty"),
        }
    }
}

impl Error for EditorError {}

/// Draft state of the add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEditor {
    mode: EditorMode,
    text: String,
}

impl TaskEditor {
    /// Empty draft for a new task. Save starts disabled.
    pub fn for_new() -> Self {
        Self {
            mode: EditorMode::Create,
            text: String::new(),
        }
    }

    /// Draft pre-filled with `task`'s current text.
    pub fn for_existing(task: &Task) -> Self {
        Self {
            mode: EditorMode::Update { id: task.id },
            text: task.text.clone(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the draft text and returns whether save is now enabled.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        self.can_save()
    }

    pub fn can_save(&self) -> bool {
        Task::is_valid_text(&self.text)
    }

    /// Returns the draft text when save is enabled.
    ///
    /// # Errors
    /// - `EmptyText` when the draft is empty.
    pub fn submit(&self) -> Result<&str, EditorError> {
        if !self.can_save() {
            return Err(EditorError::EmptyText);
        }
        Ok(&self.text)
    }
}
