//! Window seams and the per-window mode controller.
//!
//! The core never calls the OS directly. It talks to windows through
//! [`NativeWindow`], opens them through [`WindowFactory`], and drives their
//! web content through [`ContentHost`]. `platform::windows` provides the
//! Win32 implementations; tests provide fakes.

pub mod mode;
pub mod style;

pub use mode::{ModeTransition, WindowModeController};
pub use style::{ExStyle, StyleBits, WindowStyle};

use crate::error::WindowError;
use crate::model::{Bounds, ModeState, Source, DEFAULT_COLOR_KEY};

/// How a single window presents itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowMode {
    /// Bordered, resizable, in the task switcher, receives input.
    Edit,
    /// Borderless, topmost, color-keyed, input passes through.
    Overlay,
}

impl From<ModeState> for WindowMode {
    fn from(state: ModeState) -> Self {
        match state {
            ModeState::Unlocked => WindowMode::Edit,
            ModeState::Locked => WindowMode::Overlay,
        }
    }
}

/// Background color made fully transparent in overlay mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    /// Pack as a Win32 `COLORREF` (0x00BBGGRR).
    pub fn to_colorref(self) -> u32 {
        (self.r as u32) | ((self.g as u32) << 8) | ((self.b as u32) << 16)
    }
}

impl Default for ColorKey {
    fn default() -> Self {
        let (r, g, b) = DEFAULT_COLOR_KEY;
        Self { r, g, b }
    }
}

/// Presentation attributes of one native window.
///
/// All methods run on the UI thread. Implementations return
/// [`WindowError::StaleHandle`] once the window has been destroyed.
pub trait NativeWindow {
    /// Create the native handle if it does not exist yet.
    fn ensure_handle(&mut self) -> Result<(), WindowError>;

    fn read_style(&self) -> Result<StyleBits, WindowError>;

    fn write_style(&mut self, style: StyleBits) -> Result<(), WindowError>;

    /// Apply (`Some`) or remove (`None`) the transparent color key.
    fn set_color_key(&mut self, key: Option<ColorKey>) -> Result<(), WindowError>;

    /// Re-evaluate the non-client frame in place and set the z-band.
    fn refresh_frame(&mut self, topmost: bool) -> Result<(), WindowError>;

    /// Replace the native surface with a fresh one carrying the same styles,
    /// bounds and content. The window's identity does not change.
    fn recreate(&mut self) -> Result<(), WindowError>;

    fn set_visible(&mut self, visible: bool) -> Result<(), WindowError>;

    /// Live bounds as the window system reports them.
    fn bounds(&self) -> Result<Bounds, WindowError>;

    /// Destroy the native handle. Safe to call more than once.
    fn close(&mut self);
}

/// Web content renderer embedded in an overlay window.
///
/// Loading is asynchronous: these calls only start work. The host reports
/// readiness later through `events::Command::ContentReady`.
pub trait ContentHost {
    fn load(&mut self, url: &str);

    fn reload(&mut self);
}

/// A native window bound to one source.
pub trait OverlayWindow: NativeWindow {
    fn content(&mut self) -> &mut dyn ContentHost;
}

/// Opens overlay windows for sources.
pub trait WindowFactory {
    type Window: OverlayWindow;

    /// Open a window at `source.bounds`, presenting in edit mode.
    fn open(&mut self, source: &Source) -> Result<Self::Window, WindowError>;
}

impl<W: NativeWindow + ?Sized> NativeWindow for Box<W> {
    fn ensure_handle(&mut self) -> Result<(), WindowError> {
        (**self).ensure_handle()
    }

    fn read_style(&self) -> Result<StyleBits, WindowError> {
        (**self).read_style()
    }

    fn write_style(&mut self, style: StyleBits) -> Result<(), WindowError> {
        (**self).write_style(style)
    }

    fn set_color_key(&mut self, key: Option<ColorKey>) -> Result<(), WindowError> {
        (**self).set_color_key(key)
    }

    fn refresh_frame(&mut self, topmost: bool) -> Result<(), WindowError> {
        (**self).refresh_frame(topmost)
    }

    fn recreate(&mut self) -> Result<(), WindowError> {
        (**self).recreate()
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), WindowError> {
        (**self).set_visible(visible)
    }

    fn bounds(&self) -> Result<Bounds, WindowError> {
        (**self).bounds()
    }

    fn close(&mut self) {
        (**self).close()
    }
}
