//! Core of the DoIt to-do list.
//! Durable task storage and the in-memory list a display layer binds to.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AddSync, ConfigError, CoreConfig, EditSync, ListOptions};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::editor::{EditorError, EditorMode, EditorOutcome, TaskEditor};
pub use service::session::{SessionError, SessionResult, TaskListSession};
pub use service::task_list::{
    ListChange, ListError, ListObserver, ListResult, TaskListController,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
