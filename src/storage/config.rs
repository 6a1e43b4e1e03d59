//! JSON configuration file.
//!
//! Stores the registry in `<config dir>/glasspane/config.json`, or wherever
//! `GLASSPANE_CONFIG` points.
//!
//! Loading never fails: a missing, unreadable or corrupt file yields
//! defaults. Saving replaces the whole file atomically and reports failure
//! to the caller.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::coordinator::OverlayCoordinator;
use crate::error::PersistenceError;
use crate::model::constants::*;
use crate::model::{KeybindingSet, RegistryState};
use crate::window::{NativeWindow, WindowFactory};

/// Durable storage for [`RegistryState`]. The encoding is up to the backend.
pub trait ConfigBackend {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<RegistryState>, PersistenceError>;

    /// Replace the stored state in one step.
    fn save(&self, state: &RegistryState) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend at [`default_config_path`].
    pub fn at_default_location() -> Result<Self, PersistenceError> {
        default_config_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<RegistryState>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(PersistenceError::Deserialize)
    }

    fn save(&self, state: &RegistryState) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(state).map_err(PersistenceError::Serialize)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| self.io_error(e))?;

        // Write beside the target, then rename over it.
        let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(json.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }
}

/// `GLASSPANE_CONFIG` if set, else `<config dir>/glasspane/config.json`.
pub fn default_config_path() -> Result<PathBuf, PersistenceError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(PersistenceError::NoConfigDir)
}

/// Where a loaded [`RegistryState`] came from.
#[derive(Debug)]
pub enum LoadOutcome {
    Saved,
    /// Nothing saved yet.
    Missing,
    /// The stored state could not be read; defaults were used.
    Unreadable(PersistenceError),
}

impl LoadOutcome {
    /// Report the outcome once a subscriber is installed.
    pub fn log(&self, state: &RegistryState) {
        match self {
            LoadOutcome::Saved => {}
            LoadOutcome::Missing => debug!("no saved config, using defaults"),
            LoadOutcome::Unreadable(e) => warn!(error = %e, "config unreadable, using defaults"),
        }
        info!(sources = state.sources.len(), "config loaded");
    }
}

/// Load/save boundary between the coordinator and a [`ConfigBackend`].
pub struct ConfigStore<B: ConfigBackend> {
    backend: B,
}

impl<B: ConfigBackend> ConfigStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored state, or defaults when there is none or it cannot be read.
    pub fn load(&self) -> RegistryState {
        let (state, outcome) = self.read();
        outcome.log(&state);
        state
    }

    /// Like [`load`](Self::load) but leaves reporting to the caller, for use
    /// before logging is set up.
    pub fn read(&self) -> (RegistryState, LoadOutcome) {
        let (mut state, outcome) = match self.backend.load() {
            Ok(Some(state)) => (state, LoadOutcome::Saved),
            Ok(None) => (RegistryState::default(), LoadOutcome::Missing),
            Err(e) => (RegistryState::default(), LoadOutcome::Unreadable(e)),
        };
        state.validate();
        (state, outcome)
    }

    /// Capture live bounds from every open window, then write the whole
    /// state. The error is for a user-visible, non-fatal notice.
    pub fn save<F, E>(
        &self,
        coordinator: &mut OverlayCoordinator<F, E>,
        keybindings: &KeybindingSet,
        debug_logging: bool,
    ) -> Result<(), PersistenceError>
    where
        F: WindowFactory,
        E: NativeWindow,
    {
        coordinator.capture_bounds();
        let state = coordinator.registry_state(keybindings, debug_logging);
        self.backend.save(&state)?;
        info!(sources = state.sources.len(), "config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bounds, NewSource, Source};

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("absent.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("config.json");
        let backend = JsonFileBackend::new(&path);

        backend.save(&RegistryState::default()).unwrap();

        assert!(path.exists());
        assert_eq!(backend.load().unwrap(), Some(RegistryState::default()));
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let backend = JsonFileBackend::new(&path);
        assert!(matches!(backend.load(), Err(PersistenceError::Deserialize(_))));
    }

    #[test]
    fn serialized_shape_uses_plain_field_names() {
        let mut state = RegistryState::default();
        state.sources.push(
            Source::create(NewSource::new("example.com").with_bounds(Bounds::new(1, 2, 3, 4)))
                .unwrap(),
        );
        let json: serde_json::Value = serde_json::to_value(&state).unwrap();

        let source = &json["sources"][0];
        assert_eq!(source["url"], "https://example.com");
        assert_eq!(source["display_name"], "");
        assert_eq!(source["bounds"]["width"], 3);
        assert_eq!(json["keybindings"]["toggle"], DEFAULT_TOGGLE_COMBO);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let state: RegistryState = serde_json::from_str(r#"{ "debug_logging": true }"#).unwrap();
        assert!(state.debug_logging);
        assert!(state.sources.is_empty());
        assert_eq!(state.keybindings.toggle(), DEFAULT_TOGGLE_COMBO);
    }
}
