//! User-intent hooks over a task list.
//!
//! # Responsibility
//! - Bind checkbox, swipe, and editor intents to list controller calls.
//! - Re-sync the list from the store when the editor closes.
//!
//! # Invariants
//! - At most one editor is open at a time.
//! - Saves go through the list controller, so `ListOptions` decide whether a
//!   save reloads or patches the list.
//! - Dismissing the editor always triggers `reload`.
//! - A rejected save keeps the editor open.

use crate::config::EditSync;
use crate::model::task::Task;
use crate::repo::task_repo::TaskRepository;
use crate::service::editor::{EditorError, EditorMode, EditorOutcome, TaskEditor};
use crate::service::task_list::{ListError, TaskListController};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    List(ListError),
    Editor(EditorError),
    /// An editor intent arrived while no editor is open.
    NoOpenEditor,
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List(err) => write!(f, "{err}"),
            Self::Editor(err) => write!(f, "{err}"),
            Self::NoOpenEditor => write!(f, "no task editor is open"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::List(err) => Some(err),
            Self::Editor(err) => Some(err),
            Self::NoOpenEditor => None,
        }
    }
}

impl From<ListError> for SessionError {
    fn from(value: ListError) -> Self {
        Self::List(value)
    }
}

impl From<EditorError> for SessionError {
    fn from(value: EditorError) -> Self {
        Self::Editor(value)
    }
}

/// A task list screen: controller plus the optional open editor.
pub struct TaskListSession<R: TaskRepository> {
    list: TaskListController<R>,
    editor: Option<TaskEditor>,
}

impl<R: TaskRepository> TaskListSession<R> {
    pub fn new(list: TaskListController<R>) -> Self {
        Self { list, editor: None }
    }

    /// Loads the list once before first display.
    pub fn start(&mut self) -> SessionResult<()> {
        self.list.reload()?;
        Ok(())
    }

    pub fn list(&self) -> &TaskListController<R> {
        &self.list
    }

    pub fn editor(&self) -> Option<&TaskEditor> {
        self.editor.as_ref()
    }

    /// Checkbox flipped on the row at `index`.
    pub fn on_toggle(&mut self, index: usize, new_value: bool) -> SessionResult<()> {
        self.list.toggle(index, new_value)?;
        Ok(())
    }

    /// Delete confirmed after a left swipe.
    pub fn on_swipe_left_confirmed(&mut self, index: usize) -> SessionResult<Task> {
        Ok(self.list.remove_at(index)?)
    }

    /// Delete cancelled after a left swipe; the row snaps back.
    pub fn on_swipe_left_cancelled(&mut self, index: usize) -> SessionResult<()> {
        self.list.refresh_row(index)?;
        Ok(())
    }

    /// Right swipe opens the editor on the task at `index`.
    pub fn on_swipe_right(&mut self, index: usize) -> SessionResult<&TaskEditor> {
        let task = self.list.get(index).ok_or(ListError::InvalidIndex {
            index,
            len: self.list.len(),
        })?;
        Ok(self.editor.insert(TaskEditor::for_existing(task)))
    }

    /// Opens an empty editor for a new task.
    pub fn open_new_task(&mut self) -> &TaskEditor {
        self.editor.insert(TaskEditor::for_new())
    }

    /// Returns whether save is enabled after the edit.
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> SessionResult<bool> {
        let editor = self.editor.as_mut().ok_or(SessionError::NoOpenEditor)?;
        Ok(editor.on_text_changed(text))
    }

    /// Saves the open editor through the list controller and closes it.
    ///
    /// A new task goes through `add`, which applies `AddSync`. An update goes
    /// through `edit` on the task's current row; with `EditSync::Reload` the
    /// list is reloaded on close. An update whose task left the list is
    /// written by id and followed by a reload.
    pub fn save_editor(&mut self) -> SessionResult<EditorOutcome> {
        let editor = self.editor.as_ref().ok_or(SessionError::NoOpenEditor)?;
        let text = editor.submit()?.to_string();
        let mode = editor.mode();

        let (outcome, reload) = match mode {
            EditorMode::Create => (EditorOutcome::Created(self.list.add(&text)?), false),
            EditorMode::Update { id } => match self.list.position_of(id) {
                Some(index) => {
                    self.list.edit(index, &text)?;
                    let reload = self.list.options().edit_sync == EditSync::Reload;
                    (EditorOutcome::Updated(id), reload)
                }
                None => {
                    self.list.repo().update_text(id, &text).map_err(ListError::from)?;
                    (EditorOutcome::Updated(id), true)
                }
            },
        };

        self.editor = None;
        if reload {
            self.list.reload()?;
        }
        debug!("event=editor_save module=service status=ok outcome={outcome:?} reload={reload}");
        Ok(outcome)
    }

    /// Closes the open editor without saving and reloads the list.
    pub fn dismiss_editor(&mut self) -> SessionResult<()> {
        if self.editor.take().is_none() {
            return Err(SessionError::NoOpenEditor);
        }
        self.list.reload()?;
        Ok(())
    }
}
