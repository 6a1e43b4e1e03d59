//! Configuration constants and default values.
//!
//! This module contains application defaults, persisted key names and
//! validation limits.

// === Keybindings ===

/// Action name of the global Edit/Overlay toggle.
pub const ACTION_TOGGLE: &str = "toggle";

/// Combo bound to [`ACTION_TOGGLE`] when the config carries none.
pub const DEFAULT_TOGGLE_COMBO: &str = "Home";

// === Geometry ===

/// Smallest width or height a source window may have, in pixels.
pub const MIN_EXTENT: i32 = 1;

/// Default placement of a newly added source window.
pub const DEFAULT_SOURCE_BOUNDS: (i32, i32, i32, i32) = (100, 100, 480, 320);

/// Default placement of the editor surface.
pub const DEFAULT_EDITOR_BOUNDS: (i32, i32, i32, i32) = (200, 200, 640, 480);

// === Presentation ===

/// Background color (R, G, B) rendered fully transparent in overlay mode.
pub const DEFAULT_COLOR_KEY: (u8, u8, u8) = (0xFF, 0x00, 0xFF);

/// Scheme prepended to URLs entered without one.
pub const DEFAULT_URL_SCHEME: &str = "https";

// === Storage ===

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "glasspane";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GLASSPANE_CONFIG";

// === Hotkeys ===

/// First OS identifier handed out for a hotkey registration.
pub const FIRST_HOTKEY_ID: i32 = 1;

/// Largest identifier an application may use for a hotkey (Win32 limit).
pub const MAX_HOTKEY_ID: i32 = 0xBFFF;
