//! Task store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert / read-all / update-status / update-text / delete over
//!   the `tasks` table.
//! - Verify a connection is migrated before accepting it.
//!
//! # Invariants
//! - `list_tasks` returns rows in ascending id (insertion) order.
//! - Mutations on unknown ids change nothing and return `Ok(())`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use crate::model::task::{Task, TaskId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_COLUMNS: [&str; 3] = ["id", "text", "completed"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from task store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite failure. Fatal for the session.
    Db(DbError),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted row cannot be converted into a `Task`.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "task store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "task store requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable task store.
///
/// Implementations are the single source of truth for task rows. Text is
/// persisted verbatim, including the empty string.
pub trait TaskRepository {
    /// Inserts an incomplete task and returns its fresh id.
    fn insert_task(&self, text: &str) -> RepoResult<TaskId>;
    /// Returns every task in ascending id order.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Sets `completed` only. No-op when `id` is unknown.
    fn update_status(&self, id: TaskId, completed: bool) -> RepoResult<()>;
    /// Sets `text` only. No-op when `id` is unknown.
    fn update_text(&self, id: TaskId, text: &str) -> RepoResult<()>;
    /// Removes the row permanently. No-op when `id` is unknown.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn insert_task(&self, text: &str) -> RepoResult<TaskId> {
        (**self).insert_task(text)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        (**self).list_tasks()
    }

    fn update_status(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        (**self).update_status(id, completed)
    }

    fn update_text(&self, id: TaskId, text: &str) -> RepoResult<()> {
        (**self).update_text(id, text)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        (**self).delete_task(id)
    }
}

/// SQLite-backed task store.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_task_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn insert_task(&self, text: &str) -> RepoResult<TaskId> {
        self.conn.execute(
            "INSERT INTO tasks (text, completed) VALUES (?1, 0);",
            [text],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=task_insert module=repo status=ok task_id={id}");
        Ok(id)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, completed FROM tasks ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn update_status(&self, id: TaskId, completed: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1 WHERE id = ?2;",
            params![bool_to_int(completed), id],
        )?;
        debug!("event=task_update_status module=repo status=ok task_id={id} changed={changed}");
        Ok(())
    }

    fn update_text(&self, id: TaskId, text: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET text = ?1 WHERE id = ?2;",
            params![text, id],
        )?;
        debug!("event=task_update_text module=repo status=ok task_id={id} changed={changed}");
        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
        debug!("event=task_delete module=repo status=ok task_id={id} changed={changed}");
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed for id {id}"
            )));
        }
    };

    Ok(Task {
        id,
        text: row.get("text")?,
        completed,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn ensure_task_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "tasks")? {
        return Err(RepoError::MissingRequiredTable("tasks"));
    }

    for column in TASK_COLUMNS {
        if !table_has_column(conn, "tasks", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "tasks",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
