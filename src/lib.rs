//! Always-on-top web overlays with a one-hotkey lock.
//!
//! Each configured source gets its own top-level window. In *Unlocked* mode
//! the windows are framed and can be moved, resized and edited; one global
//! hotkey flips every window to *Locked* mode, where they become borderless,
//! topmost and click-through, and back again.
//!
//! Everything above `platform` is OS-independent and tested against fakes of
//! the [`window::NativeWindow`], [`window::WindowFactory`],
//! [`window::ContentHost`] and [`input::HotkeyBackend`] seams.

pub mod app;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod logging;
pub mod model;
pub mod platform;
pub mod registry;
pub mod storage;
pub mod window;

pub use app::{App, Flow, Notice, NoticeLevel};
pub use coordinator::{OverlayCoordinator, ToggleReport};
pub use error::{AppError, HotkeyError, PersistenceError, WindowError};
pub use events::{Command, CommandBus, CommandPublisher};
pub use model::{Bounds, NewSource, RegistryState, Source, SourceId};
