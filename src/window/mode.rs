//! Edit/Overlay transition for a single window.

use std::cell::Cell;

use tracing::debug;

use super::{ColorKey, NativeWindow, WindowMode};
use crate::error::WindowError;

/// Outcome of [`WindowModeController::set_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Styles changed and the native surface was rebuilt.
    Applied,
    /// The window already presented in the requested mode.
    Unchanged,
    /// Called while another transition was in flight; nothing was touched.
    Suppressed,
}

/// Applies presentation modes to windows.
///
/// Only presentation attributes are written; content and identity are never
/// touched. Style writes can raise window messages that call back into this
/// controller, so a single-flight token rejects nested calls.
#[derive(Debug)]
pub struct WindowModeController {
    color_key: ColorKey,
    in_flight: Cell<bool>,
}

/// Held for the duration of one transition.
struct FlightToken<'a>(&'a Cell<bool>);

impl Drop for FlightToken<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl Default for WindowModeController {
    fn default() -> Self {
        Self::new(ColorKey::default())
    }
}

impl WindowModeController {
    pub fn new(color_key: ColorKey) -> Self {
        Self {
            color_key,
            in_flight: Cell::new(false),
        }
    }

    pub fn color_key(&self) -> ColorKey {
        self.color_key
    }

    /// True while a transition is being applied.
    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    fn begin(&self) -> Option<FlightToken<'_>> {
        if self.in_flight.replace(true) {
            None
        } else {
            Some(FlightToken(&self.in_flight))
        }
    }

    /// Present `window` in `mode`.
    ///
    /// Idempotent: when the style words already match, nothing is written.
    /// A real change ends with one rebuild of the native surface so the
    /// non-client frame is repainted; that rebuild is always the last step.
    pub fn set_mode<W>(&self, window: &mut W, mode: WindowMode) -> Result<ModeTransition, WindowError>
    where
        W: NativeWindow + ?Sized,
    {
        let Some(_token) = self.begin() else {
            debug!(?mode, "nested mode change suppressed");
            return Ok(ModeTransition::Suppressed);
        };

        window.ensure_handle()?;

        let current = window.read_style()?;
        let target = current.target_for(mode);
        if target == current {
            return Ok(ModeTransition::Unchanged);
        }

        debug!(
            ?mode,
            from_style = format_args!("{:#010X}", current.style.bits()),
            to_style = format_args!("{:#010X}", target.style.bits()),
            from_ex = format_args!("{:#010X}", current.ex_style.bits()),
            to_ex = format_args!("{:#010X}", target.ex_style.bits()),
            "applying window mode"
        );

        window.write_style(target)?;
        match mode {
            WindowMode::Overlay => window.set_color_key(Some(self.color_key))?,
            WindowMode::Edit => window.set_color_key(None)?,
        }
        window.refresh_frame(target.is_topmost())?;
        window.recreate()?;

        Ok(ModeTransition::Applied)
    }
}
