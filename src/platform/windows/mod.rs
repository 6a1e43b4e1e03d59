//! Win32 implementation of the window, content and hotkey seams.
//!
//! - `window`: layered top-level windows whose handle can be rebuilt
//! - `content`: stand-in content host
//! - `hotkeys`: `RegisterHotKey` on a message-only window
//! - `app`: startup and the message loop

pub mod app;
pub mod content;
pub mod hotkeys;
pub mod window;

pub use app::run;
pub use content::PlaceholderContent;
pub use hotkeys::Win32HotkeyBackend;
pub use window::{Win32Window, Win32WindowFactory, WindowRole};
