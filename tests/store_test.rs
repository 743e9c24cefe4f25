use std::fs;

use doit::{Config, StoreError, TaskStore};
use tempfile::TempDir;

fn fresh_store() -> (TempDir, TaskStore) {
    let dir = TempDir::new().unwrap();
    let store = TaskStore::new(Config::new(dir.path().join("data.csv")));
    store.init().unwrap();
    (dir, store)
}

#[test]
fn ids_strictly_increase() {
    let (_dir, store) = fresh_store();
    let mut last = 0;
    for i in 0..20 {
        let task = store.add(&format!("task {i}")).unwrap();
        assert!(task.id > last, "id {} not above {}", task.id, last);
        last = task.id;
    }
    let tasks = store.list(true).unwrap();
    let ids: std::collections::HashSet<u64> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(ids.len(), 20);
}

#[test]
fn init_then_list_is_empty() {
    let (_dir, store) = fresh_store();
    assert!(store.list(false).unwrap().is_empty());
    assert!(store.list(true).unwrap().is_empty());
}

#[test]
fn add_then_list_shows_one_open_task() {
    let (_dir, store) = fresh_store();
    store.add("buy milk").unwrap();
    let tasks = store.list(false).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].description, "buy milk");
    assert!(!tasks[0].completed);
}

#[test]
fn complete_flips_only_that_task() {
    let (_dir, store) = fresh_store();
    store.add("a").unwrap();
    let b = store.add("b").unwrap();
    store.add("c").unwrap();

    store.complete(b.id).unwrap();

    let open: Vec<u64> = store.list(false).unwrap().iter().map(|t| t.id).collect();
    assert_eq!(open, vec![1, 3]);

    let all = store.list(true).unwrap();
    assert_eq!(all.len(), 3);
    for task in &all {
        assert_eq!(task.completed, task.id == b.id, "task {}", task.id);
    }
}

#[test]
fn complete_keeps_creation_time() {
    let (_dir, store) = fresh_store();
    let added = store.add("a").unwrap();
    let done = store.complete(added.id).unwrap();
    assert_eq!(done.created_at, added.created_at);
    assert_eq!(store.list(true).unwrap()[0].created_at, added.created_at);
}

#[test]
fn delete_removes_exactly_one() {
    let (_dir, store) = fresh_store();
    store.add("a").unwrap();
    store.add("b").unwrap();
    store.add("c").unwrap();
    let before = store.list(true).unwrap().len();

    let removed = store.delete(2).unwrap();
    assert_eq!(removed.description, "b");

    let after = store.list(true).unwrap();
    assert_eq!(after.len(), before - 1);
    let descs: Vec<&str> = after.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["a", "c"]);
}

#[test]
fn missing_id_reports_and_leaves_file() {
    let (_dir, store) = fresh_store();
    store.add("a").unwrap();
    store.add("b").unwrap();
    store.complete(2).unwrap();
    let before = fs::read_to_string(store.path()).unwrap();

    let err = store.complete(99).unwrap_err();
    assert!(matches!(err, StoreError::TaskNotFound(99)));
    assert_eq!(err.to_string(), "task 99 not found");

    let err = store.delete(99).unwrap_err();
    assert!(matches!(err, StoreError::TaskNotFound(99)));

    assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
}

#[test]
fn hand_written_header_with_spaces_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(
        &path,
        "ID, Description, Created, Completed\n1,walk dog,2025-03-04T05:06:07Z,true\n",
    )
    .unwrap();
    let store = TaskStore::new(Config::new(&path));
    assert!(store.list(false).unwrap().is_empty());
    let all = store.list(true).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].description, "walk dog");
    assert_eq!(store.add("feed cat").unwrap().id, 2);
}

#[test]
fn json_output_shape() {
    let (_dir, store) = fresh_store();
    store.add("a").unwrap();
    let json = serde_json::to_value(store.list(true).unwrap()).unwrap();
    let task = &json[0];
    assert_eq!(task["id"], 1);
    assert_eq!(task["description"], "a");
    assert_eq!(task["completed"], false);
    assert!(task["created_at"].is_string());
}
