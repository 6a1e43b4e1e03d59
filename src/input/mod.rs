//! Input handling: hotkey combo grammar and global hotkey dispatch.

pub mod combo;
pub mod hotkeys;

pub use combo::{Combo, KeyCode, Modifiers};
pub use hotkeys::{HotkeyBackend, HotkeyCallback, HotkeyDispatcher};
