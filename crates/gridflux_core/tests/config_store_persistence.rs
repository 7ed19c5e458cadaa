use gridflux_core::{
    ColumnConfigStore, ConfigPersistence, FieldSchema, FieldType, FileConfigStore, GridError,
};
use gridflux_test_support::FakeConfigPersistence;
use std::fs;
use std::path::PathBuf;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("gridflux-columns-{}.json", uuid::Uuid::new_v4()))
}

#[test]
fn save_and_reload_round_trips_the_column_set() {
    let path = temp_path();
    let persistence = FileConfigStore::from_path(path.clone());

    let mut store = ColumnConfigStore::with_defaults();
    store.reorder(0, 3);
    store
        .add_field(FieldSchema::new("notes", "Notes", FieldType::LongText))
        .expect("adding a fresh field should succeed");
    store
        .save(&persistence)
        .expect("saving to a temp file should succeed");

    let reloaded =
        ColumnConfigStore::load_from(&persistence).expect("reloading the file should succeed");
    assert_eq!(reloaded.fields(), store.fields());
    assert!(!reloaded.has_unsaved_changes());

    let _ = fs::remove_file(&path);
}

#[test]
fn loading_a_missing_file_falls_back_to_defaults() {
    let persistence = FileConfigStore::from_path(temp_path());

    let fields = persistence.load().expect("a missing file should load as empty");
    assert!(fields.is_empty());

    let store = ColumnConfigStore::load_from(&persistence).expect("load_from should succeed");
    assert!(!store.is_empty());
    assert!(store.get_by_name("name").is_some());
}

#[test]
fn corrupted_file_is_backed_up_and_ignored() {
    let dir = tempfile::tempdir().expect("temp dir should be available");
    let path = dir.path().join("columns.json");
    fs::write(&path, "{ not valid json").expect("writing the corrupt file should succeed");

    let persistence = FileConfigStore::from_path(path.clone());
    let fields = persistence.load().expect("a corrupt file should load as empty");
    assert!(fields.is_empty());
    assert!(!path.exists());

    let backups: Vec<_> = fs::read_dir(dir.path())
        .expect("temp dir should be readable")
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| extension.starts_with("corrupt-"))
        })
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn load_failure_is_propagated_not_swallowed() {
    let persistence = FakeConfigPersistence::new().with_load_error("settings service offline");

    let result = ColumnConfigStore::load_from(&persistence);
    assert!(matches!(result, Err(GridError::Persistence(_))));
}

#[test]
fn failed_save_keeps_the_store_dirty() {
    let persistence = FakeConfigPersistence::new().with_persist_error("settings service offline");

    let mut store = ColumnConfigStore::with_defaults();
    store.reorder(0, 1);
    assert!(store.has_unsaved_changes());

    let result = store.save(&persistence);
    assert!(matches!(result, Err(GridError::Persistence(_))));
    assert!(store.has_unsaved_changes());
    assert_eq!(persistence.stats().persist_calls, 1);
}
