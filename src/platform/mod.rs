//! Platform-specific implementations.

#[cfg(target_os = "windows")]
pub mod windows;
