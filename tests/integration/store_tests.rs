//! File-backed store tests: durability across reopen and corrupt-state policy

use column_scout::store::{IndexKind, Slot, Store, StoreError, UrlSet};
use std::fs;
use tempfile::TempDir;

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("urlsets.json")
}

#[test]
fn test_missing_file_starts_with_one_empty_set() {
    let dir = TempDir::new().unwrap();
    let store = Store::open(&store_path(&dir)).unwrap();

    assert_eq!(store.url_set_names(), vec![String::new()]);
    // Nothing is written until the first mutation
    assert!(!store_path(&dir).exists());
}

#[test]
fn test_reopen_reproduces_state_after_each_mutation() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = Store::open(&path).unwrap();

    let check = |store: &Store| {
        let reopened = Store::open(&path).expect("Failed to reopen store");
        assert_eq!(reopened.snapshot(), store.snapshot());
    };

    store
        .set_url_at(0, 3, "http://sfbay.example.org/search/bia?query=cargo")
        .unwrap();
    check(&store);

    store.update_url_set_name(0, "Bikes").unwrap();
    check(&store);

    assert_eq!(store.add_new_url_set().unwrap(), 1);
    check(&store);

    store.add_url(1).unwrap();
    check(&store);

    store.set_url_at(1, 1, "").unwrap();
    check(&store);

    store.delete_url_at(0, 0).unwrap();
    check(&store);

    store.get_or_create_url_set(2).unwrap();
    check(&store);

    let expected = vec![
        UrlSet::with_slots(
            "Bikes",
            vec![
                None,
                None,
                Some("http://sfbay.example.org/search/bia?query=cargo".to_string()),
            ],
        ),
        UrlSet::with_slots("", vec![None, Some(String::new())]),
        UrlSet::new(),
    ];
    assert_eq!(Store::open(&path).unwrap().snapshot(), expected);
}

#[test]
fn test_document_layout_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = Store::open(&path).unwrap();

    store.set_url_at(0, 1, "http://a.example/").unwrap();
    store.update_url_set_name(0, "Apartments").unwrap();

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert!(document["saved_at"].is_string());
    assert_eq!(
        document["sets"],
        serde_json::json!([{ "name": "Apartments", "urls": [null, "http://a.example/"] }])
    );
}

#[test]
fn test_hand_written_document_loads() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    fs::write(
        &path,
        r#"{"sets":[{"name":"Cars","urls":["http://x.example/",null]},{"name":"","urls":[]}]}"#,
    )
    .unwrap();

    let store = Store::open(&path).unwrap();
    assert_eq!(store.url_set_names(), vec!["Cars", ""]);
    assert_eq!(
        store.urls(0).unwrap(),
        vec![Some("http://x.example/".to_string()), None]
    );
}

#[test]
fn test_corrupt_file_refuses_to_load_and_is_untouched() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    fs::write(&path, r#"{"sets":[{"name":"Cars","urls":["#).unwrap();

    match Store::open(&path) {
        Err(StoreError::CorruptState { origin, .. }) => {
            assert!(origin.ends_with("urlsets.json"));
        }
        Err(other) => panic!("expected CorruptState, got {:?}", other),
        Ok(_) => panic!("expected CorruptState, got a store"),
    }

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        r#"{"sets":[{"name":"Cars","urls":["#
    );
}

#[test]
fn test_rejected_mutation_does_not_touch_disk() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = Store::open(&path).unwrap();
    store.set_url_at(0, 0, "http://a.example/").unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let err = store.set_url_at(2, 0, "http://b.example/").unwrap_err();
    assert!(matches!(
        err,
        StoreError::IndexOutOfRange {
            kind: IndexKind::Set,
            index: 2,
            limit: 1
        }
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_deletion_compaction_survives_reload() {
    let dir = TempDir::new().unwrap();
    let path = store_path(&dir);
    let store = Store::open(&path).unwrap();
    for (column, url) in ["a", "b", "c"].iter().enumerate() {
        store.set_url_at(0, column, url).unwrap();
    }

    store.delete_url_at(0, 1).unwrap();

    let expected: Vec<Slot> = vec![Some("a".to_string()), Some("c".to_string())];
    assert_eq!(Store::open(&path).unwrap().urls(0).unwrap(), expected);
}
