use std::fs;

use recall_planner::store::{StoreError, TaskStore};

#[test]
fn save_of_load_leaves_file_unchanged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    let original = r#"{
    "2024-01-01": [
        "Topic A"
    ],
    "2024-01-02": [
        "Topic A",
        "Topic B"
    ]
}"#;
    fs::write(&path, original).expect("write");

    let mut store = TaskStore::open(&path).expect("open");
    let plan = store.load().expect("load");
    store.save(plan).expect("save");

    assert_eq!(fs::read_to_string(&path).expect("read"), original);
}

#[test]
fn key_order_is_normalized_on_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    fs::write(&path, r#"{"2024-02-01": ["B"], "2024-01-01": ["A"]}"#).expect("write");

    let mut store = TaskStore::open(&path).expect("open");
    let plan = store.load().expect("load");
    store.save(plan.clone()).expect("save");

    let text = fs::read_to_string(&path).expect("read");
    assert!(text.find("2024-01-01") < text.find("2024-02-01"));
    assert_eq!(TaskStore::open(&path).expect("reopen").plan(), &plan);
}

#[test]
fn empty_file_is_corrupt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    fs::write(&path, "").expect("write");

    let err = TaskStore::open(&path).expect_err("empty file must not load");
    assert!(matches!(err, StoreError::CorruptState { .. }));
}

#[test]
fn non_string_topics_are_corrupt() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tasks.json");
    fs::write(&path, r#"{"2024-01-01": [1, 2]}"#).expect("write");

    assert!(matches!(
        TaskStore::open(&path),
        Err(StoreError::CorruptState { .. })
    ));
}
