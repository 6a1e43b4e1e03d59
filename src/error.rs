//! Error taxonomy.
//!
//! Nothing here is fatal to the process. Every variant maps to a
//! "no-op + notify" outcome at the call site:
//! - [`AppError`]: rejected commands (bad URL, bad reorder, unknown id)
//! - [`HotkeyError`]: unparsable combos and OS registration refusals
//! - [`PersistenceError`]: config load/save failures
//! - [`WindowError`]: native handle problems during presentation changes

use std::path::PathBuf;

use crate::model::SourceId;

/// Errors surfaced by source and coordinator operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid url '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("reorder rejected: {0}")]
    InvariantViolation(String),

    #[error("no source with id {0}")]
    UnknownSource(SourceId),

    #[error(transparent)]
    Window(#[from] WindowError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Errors from combo parsing and global hotkey registration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("cannot parse hotkey '{combo}': {reason}")]
    Parse { combo: String, reason: String },

    #[error("hotkey '{0}' is already claimed by another application")]
    RegistrationConflict(String),

    #[error("no action named '{0}'")]
    UnknownAction(String),
}

/// Errors from the durable config boundary.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("config i/o failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config could not be encoded: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("config could not be decoded: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("no config directory available on this system")]
    NoConfigDir,
}

/// Errors from native window operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("native window handle is gone")]
    StaleHandle,

    #[error("window system call failed: {0}")]
    Os(String),
}
