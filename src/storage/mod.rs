//! Configuration storage.
//!
//! Persists the registry to a JSON file (see [`config`]).

pub mod config;

pub use config::*;
