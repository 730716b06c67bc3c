//! In-memory task list synchronized with the store.
//!
//! # Responsibility
//! - Own the ordered sequence shown by the display layer.
//! - Route every mutation through the store, then patch the sequence.
//! - Notify observers with the shape of each change.
//!
//! # Invariants
//! - After `reload` the sequence is the store content, most recent first.
//! - Index arguments are bounds-checked before the store is touched.
//! - `edit` leaves in-memory text stale unless `EditSync::Patch` is set;
//!   callers re-sync with `reload`.

use crate::config::{AddSync, EditSync, ListOptions};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ListResult<T> = Result<T, ListError>;

/// Errors from list controller operations.
#[derive(Debug)]
pub enum ListError {
    /// Store failure. Fatal for the session.
    Repo(RepoError),
    /// Caller passed an index outside the current sequence.
    InvalidIndex { index: usize, len: usize },
}

impl Display for ListError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::InvalidIndex { index, len } => {
                write!(f, "task index {index} out of bounds for list of {len}")
            }
        }
    }
}

impl Error for ListError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::InvalidIndex { .. } => None,
        }
    }
}

impl From<RepoError> for ListError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Shape of a change to the in-memory sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListChange {
    /// The whole sequence was replaced.
    Reset,
    InsertedAt(usize),
    RemovedAt(usize),
    UpdatedAt(usize),
}

/// Display-layer hook receiving change notifications.
///
/// `tasks` is the sequence after the change was applied.
pub trait ListObserver {
    fn on_list_changed(&mut self, change: ListChange, tasks: &[Task]);
}

impl<F> ListObserver for F
where
    F: FnMut(ListChange, &[Task]),
{
    fn on_list_changed(&mut self, change: ListChange, tasks: &[Task]) {
        self(change, tasks)
    }
}

/// Ordered task list backed by a store.
pub struct TaskListController<R: TaskRepository> {
    repo: R,
    options: ListOptions,
    tasks: Vec<Task>,
    observers: Vec<Box<dyn ListObserver>>,
}

impl<R: TaskRepository> TaskListController<R> {
    /// Creates an empty controller. Call `reload` before first display.
    pub fn new(repo: R, options: ListOptions) -> Self {
        Self {
            repo,
            options,
            tasks: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Registers a display-layer observer.
    pub fn subscribe(&mut self, observer: Box<dyn ListObserver>) {
        self.observers.push(observer);
    }

    /// Store this controller mutates through.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn options(&self) -> ListOptions {
        self.options
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Current row of the task with `id`, if it is in the list.
    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    /// Replaces the sequence with the store content, most recent first.
    pub fn reload(&mut self) -> ListResult<()> {
        let mut tasks = self.repo.list_tasks()?;
        tasks.reverse();
        self.tasks = tasks;
        info!(
            "event=list_reload module=service status=ok count={}",
            self.tasks.len()
        );
        self.notify(ListChange::Reset);
        Ok(())
    }

    /// Inserts `text` through the store and surfaces it at the front.
    ///
    /// Text is not validated here; see `TaskEditor` for the non-empty check.
    pub fn add(&mut self, text: &str) -> ListResult<TaskId> {
        let id = self.repo.insert_task(text)?;
        match self.options.add_sync {
            AddSync::Reload => self.reload()?,
            AddSync::Incremental => {
                self.tasks.insert(0, Task::new(id, text));
                self.notify(ListChange::InsertedAt(0));
            }
        }
        debug!("event=list_add module=service status=ok task_id={id}");
        Ok(id)
    }

    /// Sets completion of the task at `index`, in the store and in memory.
    pub fn toggle(&mut self, index: usize, completed: bool) -> ListResult<()> {
        let id = self.resolve(index)?;
        self.repo.update_status(id, completed)?;
        self.tasks[index].completed = completed;
        self.notify(ListChange::UpdatedAt(index));
        Ok(())
    }

    /// Replaces the text of the task at `index` in the store.
    ///
    /// With the default `EditSync::Reload` the in-memory entry keeps its old
    /// text and no notification is sent until the caller runs `reload`.
    pub fn edit(&mut self, index: usize, text: &str) -> ListResult<()> {
        let id = self.resolve(index)?;
        self.repo.update_text(id, text)?;
        if self.options.edit_sync == EditSync::Patch {
            self.tasks[index].text = text.to_string();
            self.notify(ListChange::UpdatedAt(index));
        }
        Ok(())
    }

    /// Deletes the task at `index` and returns it. Other tasks keep their order.
    pub fn remove_at(&mut self, index: usize) -> ListResult<Task> {
        let id = self.resolve(index)?;
        self.repo.delete_task(id)?;
        let removed = self.tasks.remove(index);
        self.notify(ListChange::RemovedAt(index));
        debug!("event=list_remove module=service status=ok task_id={id} index={index}");
        Ok(removed)
    }

    /// Asks observers to redraw the row at `index` without changing data.
    pub fn refresh_row(&mut self, index: usize) -> ListResult<()> {
        self.resolve(index)?;
        self.notify(ListChange::UpdatedAt(index));
        Ok(())
    }

    fn resolve(&self, index: usize) -> ListResult<TaskId> {
        self.tasks
            .get(index)
            .map(|task| task.id)
            .ok_or(ListError::InvalidIndex {
                index,
                len: self.tasks.len(),
            })
    }

    fn notify(&mut self, change: ListChange) {
        for observer in &mut self.observers {
            observer.on_list_changed(change, &self.tasks);
        }
    }
}
