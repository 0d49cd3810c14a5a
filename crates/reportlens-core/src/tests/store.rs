use crate::store::{METADATA_KEY, THEME_KEY, validate_key};
use crate::{FileStore, KeyValueStore, MemoryStore, MetadataStore, Preferences, StoreError};

#[test]
fn load_is_absent_before_any_save() {
    let store = MetadataStore::new(MemoryStore::new());
    assert_eq!(store.load(), None);
}

#[test]
fn save_then_load_round_trips() {
    let metadata = super::scenario_metadata();
    let mut store = MetadataStore::new(MemoryStore::new());
    store.save(&metadata).unwrap();

    let first = store.load();
    let second = store.load();
    assert_eq!(first.as_ref(), Some(&metadata));
    assert_eq!(first, second);
}

#[test]
fn save_overwrites_previous_value() {
    let mut metadata = super::scenario_metadata();
    let mut store = MetadataStore::new(MemoryStore::new());
    store.save(&metadata).unwrap();

    metadata.theme = "Executive".to_string();
    metadata.pages.truncate(1);
    store.save(&metadata).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.theme, "Executive");
    assert_eq!(loaded.pages.len(), 1);
}

#[test]
fn corrupt_stored_metadata_loads_as_absent() {
    let mut backend = MemoryStore::new();
    backend.set(METADATA_KEY, "{\"pages\": [").unwrap();
    let store = MetadataStore::new(backend);
    assert_eq!(store.load(), None);
}

#[test]
fn preferences_use_their_own_key() {
    let mut store = MetadataStore::new(MemoryStore::new());
    assert_eq!(store.load_preferences(), Preferences::default());

    store.save_preferences(Preferences { dark_mode: true }).unwrap();
    assert!(store.load_preferences().dark_mode);
    assert_eq!(store.load(), None);
    assert_eq!(
        store.backend().get(THEME_KEY).unwrap().as_deref(),
        Some("dark")
    );

    store.save(&super::scenario_metadata()).unwrap();
    store.clear().unwrap();
    assert_eq!(store.load(), None);
    assert!(store.load_preferences().dark_mode, "clear keeps preferences");
}

#[test]
fn unknown_theme_literal_loads_as_light() {
    let mut backend = MemoryStore::new();
    backend.set(THEME_KEY, "sepia").unwrap();
    let store = MetadataStore::new(backend);
    assert!(!store.load_preferences().dark_mode);
}

#[test]
fn keys_are_validated() {
    assert!(validate_key("report_metadata").is_ok());
    assert!(validate_key("theme").is_ok());
    for bad in ["", "../etc", ".hidden", "a/b", "a b"] {
        assert!(
            matches!(validate_key(bad), Err(StoreError::InvalidKey { .. })),
            "{bad:?}"
        );
    }
    let mut backend = MemoryStore::new();
    assert!(backend.set("a/b", "x").is_err());
    assert!(backend.is_empty());
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let metadata = super::scenario_metadata();
    {
        let mut store = MetadataStore::new(FileStore::open(dir.path()).unwrap());
        store.save(&metadata).unwrap();
        store.save_preferences(Preferences { dark_mode: true }).unwrap();
    }

    let store = MetadataStore::new(FileStore::open(dir.path()).unwrap());
    assert_eq!(store.load(), Some(metadata));
    assert!(store.load_preferences().dark_mode);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("theme")).unwrap(),
        "dark"
    );
    assert!(!dir.path().join("report_metadata.tmp").exists());
}

#[test]
fn file_store_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut backend = FileStore::open(dir.path().join("nested")).unwrap();
    backend.remove(METADATA_KEY).unwrap();
    backend.set(METADATA_KEY, "{}").unwrap();
    assert_eq!(backend.get(METADATA_KEY).unwrap().as_deref(), Some("{}"));
    backend.remove(METADATA_KEY).unwrap();
    backend.remove(METADATA_KEY).unwrap();
    assert_eq!(backend.get(METADATA_KEY).unwrap(), None);
}
