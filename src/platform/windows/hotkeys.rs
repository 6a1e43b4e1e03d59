//! `RegisterHotKey` backend.
//!
//! Combos are claimed for a message-only window, so `WM_HOTKEY` arrives in
//! the thread queue and the message loop can route it without a window
//! procedure.

use windows::core::w;
use windows::Win32::Foundation::{HINSTANCE, HWND};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_NOREPEAT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DestroyWindow, HWND_MESSAGE, WINDOW_EX_STYLE, WINDOW_STYLE,
};

use tracing::{debug, warn};

use super::window::os_error;
use crate::error::{HotkeyError, WindowError};
use crate::input::{Combo, HotkeyBackend};

pub struct Win32HotkeyBackend {
    hwnd: HWND,
}

impl Win32HotkeyBackend {
    pub fn new(instance: HINSTANCE) -> Result<Self, WindowError> {
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                w!("glasspane hotkeys"),
                WINDOW_STYLE(0),
                0,
                0,
                0,
                0,
                Some(HWND_MESSAGE),
                None,
                Some(instance),
                None,
            )
        }
        .map_err(os_error)?;
        Ok(Self { hwnd })
    }
}

impl HotkeyBackend for Win32HotkeyBackend {
    fn register(&mut self, id: i32, combo: &Combo) -> Result<(), HotkeyError> {
        let modifiers = HOT_KEY_MODIFIERS(combo.modifiers.bits() | MOD_NOREPEAT.0);
        unsafe { RegisterHotKey(Some(self.hwnd), id, modifiers, combo.key.vk()) }.map_err(|e| {
            debug!(id, combo = %combo, error = %e, "RegisterHotKey refused");
            HotkeyError::RegistrationConflict(combo.to_string())
        })
    }

    fn unregister(&mut self, id: i32) {
        if let Err(e) = unsafe { UnregisterHotKey(Some(self.hwnd), id) } {
            warn!(id, error = %e, "UnregisterHotKey failed");
        }
    }
}

impl Drop for Win32HotkeyBackend {
    fn drop(&mut self) {
        let _ = unsafe { DestroyWindow(self.hwnd) };
    }
}
