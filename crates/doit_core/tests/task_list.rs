use doit_core::db::open_db_in_memory;
use doit_core::{
    AddSync, EditSync, ListChange, ListOptions, SqliteTaskRepository, Task, TaskListController,
    TaskRepository,
};
use std::cell::RefCell;
use std::rc::Rc;

fn texts(list: &TaskListController<impl TaskRepository>) -> Vec<&str> {
    list.tasks().iter().map(|task| task.text.as_str()).collect()
}

#[test]
fn reload_yields_reverse_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut list = TaskListController::new(&store, ListOptions::default());

    for text in ["one", "two", "three", "four"] {
        list.add(text).unwrap();
    }
    list.reload().unwrap();

    assert_eq!(texts(&list), vec!["four", "three", "two", "one"]);
}

#[test]
fn toggle_round_trip_restores_completed() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut list = TaskListController::new(&store, ListOptions::default());
    list.add("a").unwrap();
    list.add("b").unwrap();
    let original = list.tasks()[1].clone();

    list.toggle(1, true).unwrap();
    assert!(list.tasks()[1].completed);
    assert!(store.list_tasks().unwrap()[0].completed);

    list.toggle(1, false).unwrap();
    assert_eq!(list.tasks()[1], original);
    list.reload().unwrap();
    assert_eq!(list.tasks()[1], original);
}

#[test]
fn remove_at_drops_exactly_one_and_keeps_order() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut list = TaskListController::new(&store, ListOptions::default());
    for text in ["a", "b", "c", "d"] {
        list.add(text).unwrap();
    }
    let target = list.tasks()[2].clone();

    let removed = list.remove_at(2).unwrap();

    assert_eq!(removed, target);
    assert_eq!(list.len(), 3);
    assert_eq!(texts(&list), vec!["d", "c", "a"]);
    assert!(store.list_tasks().unwrap().iter().all(|t| t.id != target.id));
}

#[test]
fn edit_is_visible_after_reload_with_same_identity() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut list = TaskListController::new(&store, ListOptions::default());
    list.add("draft").unwrap();
    list.toggle(0, true).unwrap();
    let before = list.tasks()[0].clone();

    list.edit(0, "final").unwrap();
    assert_eq!(list.tasks()[0].text, "draft");

    list.reload().unwrap();
    let after = &list.tasks()[0];
    assert_eq!(after.id, before.id);
    assert_eq!(after.text, "final");
    assert!(after.completed);
}

#[test]
fn patch_edit_sync_updates_in_memory_immediately() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let options = ListOptions {
        edit_sync: EditSync::Patch,
        ..ListOptions::default()
    };
    let mut list = TaskListController::new(&store, options);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    list.subscribe(Box::new(move |change: ListChange, _tasks: &[Task]| {
        sink.borrow_mut().push(change)
    }));

    list.add("draft").unwrap();
    list.edit(0, "final").unwrap();

    assert_eq!(list.tasks()[0].text, "final");
    assert_eq!(
        *changes.borrow(),
        vec![ListChange::Reset, ListChange::UpdatedAt(0)]
    );
}

#[test]
fn incremental_add_sync_inserts_at_front() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let options = ListOptions {
        add_sync: AddSync::Incremental,
        ..ListOptions::default()
    };
    let mut list = TaskListController::new(&store, options);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&changes);
    list.subscribe(Box::new(move |change: ListChange, _tasks: &[Task]| {
        sink.borrow_mut().push(change)
    }));

    let first = list.add("Buy milk").unwrap();
    let second = list.add("Walk dog").unwrap();

    assert_eq!(
        *changes.borrow(),
        vec![ListChange::InsertedAt(0), ListChange::InsertedAt(0)]
    );
    assert_eq!(
        list.tasks(),
        &[Task::new(second, "Walk dog"), Task::new(first, "Buy milk")]
    );

    let incremental = list.tasks().to_vec();
    list.reload().unwrap();
    assert_eq!(list.tasks(), incremental.as_slice());
}

#[test]
fn end_to_end_buy_milk_walk_dog() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteTaskRepository::try_new(&conn).unwrap();
    let mut list = TaskListController::new(&store, ListOptions::default());

    list.add("Buy milk").unwrap();
    list.reload().unwrap();
    assert_eq!(texts(&list), vec!["Buy milk"]);
    assert!(!list.tasks()[0].completed);

    list.add("Walk dog").unwrap();
    list.reload().unwrap();
    assert_eq!(texts(&list), vec!["Walk dog", "Buy milk"]);

    list.toggle(1, true).unwrap();
    assert!(list.tasks()[1].completed);
    assert!(!list.tasks()[0].completed);

    list.remove_at(0).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.tasks()[0].text, "Buy milk");
    assert!(list.tasks()[0].completed);

    list.reload().unwrap();
    assert_eq!(texts(&list), vec!["Buy milk"]);
    assert!(list.tasks()[0].completed);
}
