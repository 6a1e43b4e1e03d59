//! Application root and user-visible notices.
//!
//! [`App`] owns the coordinator, the hotkey dispatcher and the config store,
//! and is the single consumer of [`crate::events::Command`]s.

pub mod notice;
pub mod root;

pub use notice::{Notice, NoticeLevel};
pub use root::{App, Coordinator, Flow};
