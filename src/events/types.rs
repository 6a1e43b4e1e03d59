//! Typed commands for inter-module communication.
//!
//! Every user action and OS notification that mutates state becomes one of
//! these values. Producers (the editing surface, window procedures, content
//! hosts) only publish; `app::App::handle` is the single consumer.
//! This module is pure Rust with no FFI dependencies, making it fully testable.

use crate::model::{Bounds, NewSource, SourceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // === Mode ===
    /// Flip every window between Edit and Overlay.
    Toggle,

    // === Source lifecycle (editing surface) ===
    AddSource(NewSource),
    RemoveSource(SourceId),
    /// Replace the order; must be a permutation of the current ids.
    Reorder(Vec<SourceId>),
    Rename { id: SourceId, name: String },
    SetUrl { id: SourceId, url: String },
    Reload(SourceId),
    ReloadAll,

    // === Window notifications ===
    /// Operator finished dragging or resizing an overlay window.
    BoundsChanged { id: SourceId, bounds: Bounds },
    EditorBoundsChanged(Bounds),
    /// Content host finished its first load.
    ContentReady(SourceId),

    // === Settings ===
    RebindHotkey { action: String, combo: String },
    Save,

    // === Lifecycle ===
    Shutdown,
}

impl Command {
    /// True for commands that only report what the window system already
    /// did; these never produce user-visible notices.
    pub fn is_notification(&self) -> bool {
        matches!(
            self,
            Command::BoundsChanged { .. }
                | Command::EditorBoundsChanged(_)
                | Command::ContentReady(_)
        )
    }

    /// Returns a human-readable description of the command for debugging.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Toggle => "Toggle edit/overlay mode",
            Command::AddSource(_) => "Add source",
            Command::RemoveSource(_) => "Remove source",
            Command::Reorder(_) => "Reorder sources",
            Command::Rename { .. } => "Rename source",
            Command::SetUrl { .. } => "Change source url",
            Command::Reload(_) => "Reload source",
            Command::ReloadAll => "Reload all sources",
            Command::BoundsChanged { .. } => "Window bounds changed",
            Command::EditorBoundsChanged(_) => "Editor bounds changed",
            Command::ContentReady(_) => "Content ready",
            Command::RebindHotkey { .. } => "Rebind hotkey",
            Command::Save => "Save config",
            Command::Shutdown => "Shut down",
        }
    }
}
