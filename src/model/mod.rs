//! Application domain model.
//!
//! This module contains pure data types (no FFI dependencies): sources,
//! their bounds, the persisted registry state, the global mode, and
//! configuration constants.
//!
//! Persistence lives in `storage`; platform windows in `platform`.

pub mod app_state;
pub mod constants;
pub mod source;

pub use app_state::{KeybindingSet, ModeState, RegistryState};
pub use constants::*;
pub use source::{normalize_url, Bounds, NewSource, Source, SourceId};
