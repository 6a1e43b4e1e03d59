//! Tests for loading and saving the registry through `ConfigStore`.

mod common;

use std::fs;

use common::{coordinator_with, ids, MemoryBackend};
use glasspane::model::{Bounds, KeybindingSet, RegistryState, DEFAULT_TOGGLE_COMBO};
use glasspane::storage::{ConfigStore, JsonFileBackend, LoadOutcome};
use glasspane::PersistenceError;
use pretty_assertions::assert_eq;

// === Round trip ===

#[test]
fn save_then_load_reproduces_sources() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(dir.path().join("config.json")));

    let mut coordinator = coordinator_with(&["a.test", "b.test/feed"]);
    let [a, b]: [_; 2] = ids(&coordinator).try_into().unwrap();
    coordinator.rename(b, "Feed").unwrap();
    coordinator.window_mut(a).unwrap().bounds = Bounds::new(10, 20, 300, 400);

    let mut keys = KeybindingSet::default();
    keys.set("toggle", "Ctrl+Alt+Home");
    store.save(&mut coordinator, &keys, true).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.sources, coordinator.sources().to_vec());
    assert_eq!(loaded.sources[0].bounds, Bounds::new(10, 20, 300, 400));
    assert_eq!(loaded.sources[1].url, "https://b.test/feed");
    assert_eq!(loaded.sources[1].display_name, "Feed");
    assert_eq!(loaded.keybindings.toggle(), "Ctrl+Alt+Home");
    assert!(loaded.debug_logging);
}

#[test]
fn save_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(dir.path().join("config.json")));

    let mut first = coordinator_with(&["a.test", "b.test"]);
    store.save(&mut first, &KeybindingSet::default(), false).unwrap();
    let mut second = coordinator_with(&["c.test"]);
    store.save(&mut second, &KeybindingSet::default(), false).unwrap();

    let loaded = store.load();
    assert_eq!(loaded.sources.len(), 1);
    assert_eq!(loaded.sources[0].url, "https://c.test");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

// === Degraded loads ===

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(dir.path().join("none.json")));

    assert_eq!(store.load(), RegistryState::default());
}

#[test]
fn corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "[1, 2,").unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(&path));

    let state = store.load();

    assert!(state.sources.is_empty());
    assert_eq!(state.keybindings.toggle(), DEFAULT_TOGGLE_COMBO);
}

#[test]
fn read_reports_where_state_came_from() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let store = ConfigStore::new(JsonFileBackend::new(&path));

    assert!(matches!(store.read().1, LoadOutcome::Missing));

    fs::write(&path, "[1, 2,").unwrap();
    let (state, outcome) = store.read();
    assert_eq!(state, RegistryState::default());
    assert!(matches!(outcome, LoadOutcome::Unreadable(PersistenceError::Deserialize(_))));

    fs::write(&path, r#"{ "sources": [], "keybindings": {} }"#).unwrap();
    assert!(matches!(store.read().1, LoadOutcome::Saved));
}

#[test]
fn invalid_entries_are_dropped_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let json = r#"{
        "sources": [
            { "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301", "url": "good.test",
              "bounds": { "x": 0, "y": 0, "width": 0, "height": 50 } },
            { "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301", "url": "dupe.test",
              "bounds": { "x": 0, "y": 0, "width": 10, "height": 10 } },
            { "id": "6fa459ea-ee8a-3ca4-894e-db77e160355e", "url": "   ",
              "bounds": { "x": 0, "y": 0, "width": 10, "height": 10 } }
        ],
        "keybindings": {}
    }"#;
    fs::write(&path, json).unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(&path));

    let state = store.load();

    assert_eq!(state.sources.len(), 1);
    assert_eq!(state.sources[0].url, "https://good.test");
    assert_eq!(state.sources[0].display_name, "");
    assert_eq!(state.sources[0].bounds.width, 1);
    assert_eq!(state.keybindings.toggle(), DEFAULT_TOGGLE_COMBO);
}

// === Failures ===

#[test]
fn failed_save_reports_an_error() {
    let backend = MemoryBackend {
        fail_saves: true,
        ..MemoryBackend::default()
    };
    let store = ConfigStore::new(backend.clone());
    let mut coordinator = coordinator_with(&["a.test"]);

    let err = store.save(&mut coordinator, &KeybindingSet::default(), false);

    assert!(matches!(err, Err(PersistenceError::Io { .. })));
    assert!(backend.stored.borrow().is_none());
}

#[test]
fn save_into_unwritable_location_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "").unwrap();
    let store = ConfigStore::new(JsonFileBackend::new(blocker.join("config.json")));
    let mut coordinator = coordinator_with(&[]);

    assert!(store.save(&mut coordinator, &KeybindingSet::default(), false).is_err());
}
