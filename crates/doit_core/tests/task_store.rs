use doit_core::db::migrations::latest_version;
use doit_core::db::open_db_in_memory;
use doit_core::{RepoError, SqliteTaskRepository, Task, TaskRepository};
use rusqlite::Connection;

#[test]
fn insert_assigns_increasing_ids_and_defaults_to_incomplete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = store.insert_task("Buy milk").unwrap();
    let second = store.insert_task("Walk dog").unwrap();
    assert!(second > first);

    let tasks = store.list_tasks().unwrap();
    assert_eq!(
        tasks,
        vec![Task::new(first, "Buy milk"), Task::new(second, "Walk dog")]
    );
}

#[test]
fn ids_are_not_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let first = store.insert_task("a").unwrap();
    let second = store.insert_task("b").unwrap();
    store.delete_task(second).unwrap();
    let third = store.insert_task("c").unwrap();

    assert!(third > second);
    let ids: Vec<_> = store.list_tasks().unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[test]
fn empty_text_is_persisted_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = store.insert_task("").unwrap();
    let tasks = store.list_tasks().unwrap();
    assert_eq!(tasks, vec![Task::new(id, "")]);
}

#[test]
fn update_status_and_text_touch_only_their_field() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = store.insert_task("draft").unwrap();
    store.update_status(id, true).unwrap();
    store.update_text(id, "final").unwrap();

    let task = &store.list_tasks().unwrap()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.text, "final");
    assert!(task.completed);

    store.update_status(id, false).unwrap();
    let task = &store.list_tasks().unwrap()[0];
    assert_eq!(task.text, "final");
    assert!(!task.completed);
}

#[test]
fn mutations_on_missing_id_are_silent_noops() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = store.insert_task("keep me").unwrap();
    let before = store.list_tasks().unwrap();

    store.update_status(id + 100, true).unwrap();
    store.update_text(id + 100, "ghost").unwrap();
    store.delete_task(id + 100).unwrap();
    store.delete_task(-1).unwrap();

    assert_eq!(store.list_tasks().unwrap(), before);
}

#[test]
fn delete_removes_row_permanently() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let id = store.insert_task("gone").unwrap();
    store.delete_task(id).unwrap();
    store.delete_task(id).unwrap();

    assert!(store.list_tasks().unwrap().is_empty());
}

#[test]
fn list_rejects_invalid_completed_value() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO tasks (text, completed) VALUES ('odd', 7);",
    )
    .unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();

    let err = store.list_tasks().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteTaskRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_tasks_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("tasks"))));
}

#[test]
fn repository_rejects_connection_missing_completed_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteTaskRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "tasks",
            column: "completed"
        })
    ));
}
