//! Window style bitmasks.
//!
//! Bit values are the Win32 `WS_*` / `WS_EX_*` constants so the target
//! computation is plain arithmetic and runs in tests on any platform. Bits
//! this crate does not name (visibility, clipping, ...) are carried through
//! untouched.

use bitflags::bitflags;

use super::WindowMode;

bitflags! {
    /// Subset of `GWL_STYLE` bits that shape the frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyle: u32 {
        const POPUP = 0x8000_0000;
        const CAPTION = 0x00C0_0000;
        const SYSMENU = 0x0008_0000;
        const THICKFRAME = 0x0004_0000;
        const MINIMIZEBOX = 0x0002_0000;
        const MAXIMIZEBOX = 0x0001_0000;

        /// Bordered, resizable frame used in edit mode.
        const FRAME = Self::CAPTION.bits()
            | Self::SYSMENU.bits()
            | Self::THICKFRAME.bits()
            | Self::MINIMIZEBOX.bits()
            | Self::MAXIMIZEBOX.bits();
    }
}

bitflags! {
    /// Subset of `GWL_EXSTYLE` bits that drive overlay behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExStyle: u32 {
        const TOPMOST = 0x0000_0008;
        const TRANSPARENT = 0x0000_0020;
        const TOOLWINDOW = 0x0000_0080;
        const APPWINDOW = 0x0004_0000;
        const LAYERED = 0x0008_0000;

        /// Everything overlay mode switches on.
        const OVERLAY = Self::TOPMOST.bits()
            | Self::TRANSPARENT.bits()
            | Self::TOOLWINDOW.bits()
            | Self::LAYERED.bits();
    }
}

/// Both style words of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleBits {
    pub style: WindowStyle,
    pub ex_style: ExStyle,
}

impl StyleBits {
    /// Wrap raw words as read from the OS, keeping unknown bits.
    pub fn from_raw(style: u32, ex_style: u32) -> Self {
        Self {
            style: WindowStyle::from_bits_retain(style),
            ex_style: ExStyle::from_bits_retain(ex_style),
        }
    }

    /// Styles of a freshly created window in `mode`.
    pub fn initial(mode: WindowMode) -> Self {
        Self::from_raw(0, 0).target_for(mode)
    }

    /// Styles this window must carry to present in `mode`.
    pub fn target_for(self, mode: WindowMode) -> Self {
        match mode {
            WindowMode::Edit => Self {
                style: (self.style - WindowStyle::POPUP) | WindowStyle::FRAME,
                ex_style: (self.ex_style - ExStyle::OVERLAY) | ExStyle::APPWINDOW,
            },
            WindowMode::Overlay => Self {
                style: (self.style - WindowStyle::FRAME) | WindowStyle::POPUP,
                ex_style: (self.ex_style - ExStyle::APPWINDOW) | ExStyle::OVERLAY,
            },
        }
    }

    pub fn is_input_transparent(&self) -> bool {
        self.ex_style.contains(ExStyle::TRANSPARENT)
    }

    pub fn is_topmost(&self) -> bool {
        self.ex_style.contains(ExStyle::TOPMOST)
    }

    pub fn has_frame(&self) -> bool {
        self.style.intersects(WindowStyle::FRAME)
    }

    pub fn in_task_switcher(&self) -> bool {
        !self.ex_style.contains(ExStyle::TOOLWINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISIBLE: u32 = 0x1000_0000;

    #[test]
    fn overlay_target_strips_frame_and_sets_passthrough() {
        let edit = StyleBits::initial(WindowMode::Edit);
        let overlay = edit.target_for(WindowMode::Overlay);

        assert!(!overlay.has_frame());
        assert!(overlay.style.contains(WindowStyle::POPUP));
        assert!(overlay.is_input_transparent());
        assert!(overlay.is_topmost());
        assert!(overlay.ex_style.contains(ExStyle::LAYERED));
        assert!(!overlay.in_task_switcher());
    }

    #[test]
    fn edit_target_restores_frame_and_input() {
        let overlay = StyleBits::initial(WindowMode::Overlay);
        let edit = overlay.target_for(WindowMode::Edit);

        assert!(edit.style.contains(WindowStyle::FRAME));
        assert!(!edit.style.contains(WindowStyle::POPUP));
        assert!(!edit.is_input_transparent());
        assert!(!edit.is_topmost());
        assert!(!edit.ex_style.contains(ExStyle::LAYERED));
        assert!(edit.in_task_switcher());
    }

    #[test]
    fn target_is_a_fixed_point() {
        for mode in [WindowMode::Edit, WindowMode::Overlay] {
            let once = StyleBits::from_raw(VISIBLE, 0).target_for(mode);
            assert_eq!(once.target_for(mode), once);
        }
    }

    #[test]
    fn unknown_bits_survive_both_directions() {
        let start = StyleBits::from_raw(VISIBLE, 0x0000_0100);
        let round = start
            .target_for(WindowMode::Overlay)
            .target_for(WindowMode::Edit);
        assert_eq!(round.style.bits() & VISIBLE, VISIBLE);
        assert_eq!(round.ex_style.bits() & 0x0000_0100, 0x0000_0100);
    }
}
