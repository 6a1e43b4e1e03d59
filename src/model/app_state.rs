//! Application state (pure Rust, no FFI).
//!
//! This module defines the persisted registry state and the global
//! Locked/Unlocked mode.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::constants::*;
use super::source::{normalize_url, Bounds, Source};

/// Named action → combo string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeybindingSet(BTreeMap<String, String>);

impl KeybindingSet {
    pub fn get(&self, action: &str) -> Option<&str> {
        self.0.get(action).map(String::as_str)
    }

    pub fn set(&mut self, action: impl Into<String>, combo: impl Into<String>) {
        self.0.insert(action.into(), combo.into());
    }

    /// Combo for the toggle action, falling back to the default.
    pub fn toggle(&self) -> &str {
        self.get(ACTION_TOGGLE).unwrap_or(DEFAULT_TOGGLE_COMBO)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }
}

impl Default for KeybindingSet {
    fn default() -> Self {
        let mut map = BTreeMap::new();
        map.insert(ACTION_TOGGLE.to_string(), DEFAULT_TOGGLE_COMBO.to_string());
        Self(map)
    }
}

/// Everything that survives a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryState {
    /// Ordered sources; order is paint/activation order.
    pub sources: Vec<Source>,
    pub editor_bounds: Bounds,
    pub keybindings: KeybindingSet,
    /// Verbose logging; `RUST_LOG` is honoured only when set.
    pub debug_logging: bool,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            editor_bounds: Bounds::default_editor(),
            keybindings: KeybindingSet::default(),
            debug_logging: false,
        }
    }
}

impl RegistryState {
    /// Repair loaded state in place.
    ///
    /// Bounds are raised to the minimum extent. Sources whose URL does not
    /// normalize, or whose id repeats an earlier one, are dropped. A missing
    /// toggle binding is restored to the default.
    pub fn validate(&mut self) {
        self.editor_bounds = self.editor_bounds.sanitized();

        let mut seen = HashSet::with_capacity(self.sources.len());
        self.sources.retain_mut(|source| {
            if !seen.insert(source.id) {
                warn!(id = %source.id, "dropping source with duplicate id");
                return false;
            }
            match normalize_url(&source.url) {
                Ok(url) => source.url = url,
                Err(e) => {
                    warn!(id = %source.id, error = %e, "dropping source with invalid url");
                    return false;
                }
            }
            source.bounds = source.bounds.sanitized();
            true
        });

        if self.keybindings.get(ACTION_TOGGLE).is_none() {
            self.keybindings.set(ACTION_TOGGLE, DEFAULT_TOGGLE_COMBO);
        }
    }
}

/// Global presentation state shared by every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeState {
    /// Editable layout: bordered, movable windows; editor visible.
    #[default]
    Unlocked,
    /// Click-through overlay: borderless, topmost, input-transparent.
    Locked,
}

impl ModeState {
    pub fn toggled(self) -> Self {
        match self {
            ModeState::Unlocked => ModeState::Locked,
            ModeState::Locked => ModeState::Unlocked,
        }
    }

    pub fn is_locked(self) -> bool {
        self == ModeState::Locked
    }
}
