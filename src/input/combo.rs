//! Hotkey combo grammar.
//!
//! A combo is `+`-separated tokens: any number of modifiers (`Ctrl`, `Alt`,
//! `Shift`, in any order, case-insensitive) followed by exactly one key
//! name as the last token. Anything else rejects the whole combo.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::HotkeyError;

bitflags! {
    /// Modifier flags, valued as Win32 `MOD_*`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const ALT = 0x0001;
        const CONTROL = 0x0002;
        const SHIFT = 0x0004;
    }
}

/// Physical key, identified by its Win32 virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(u32);

/// Named keys with fixed codes. The first spelling is canonical.
const NAMED_KEYS: &[(&str, u32)] = &[
    ("Backspace", 0x08),
    ("Tab", 0x09),
    ("Enter", 0x0D),
    ("Return", 0x0D),
    ("Pause", 0x13),
    ("Escape", 0x1B),
    ("Esc", 0x1B),
    ("Space", 0x20),
    ("PageUp", 0x21),
    ("PgUp", 0x21),
    ("PageDown", 0x22),
    ("PgDn", 0x22),
    ("End", 0x23),
    ("Home", 0x24),
    ("Left", 0x25),
    ("Up", 0x26),
    ("Right", 0x27),
    ("Down", 0x28),
    ("PrintScreen", 0x2C),
    ("Insert", 0x2D),
    ("Ins", 0x2D),
    ("Delete", 0x2E),
    ("Del", 0x2E),
    ("ScrollLock", 0x91),
];

const VK_0: u32 = 0x30;
const VK_A: u32 = 0x41;
const VK_NUMPAD0: u32 = 0x60;
const VK_F1: u32 = 0x70;
const MAX_F_KEY: u32 = 24;

impl KeyCode {
    pub fn vk(self) -> u32 {
        self.0
    }

    /// Look up a key by name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.to_ascii_uppercase();

        if let Some((_, vk)) = NAMED_KEYS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(&upper))
        {
            return Some(Self(*vk));
        }

        let mut chars = upper.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                'A'..='Z' => Some(Self(VK_A + (c as u32 - 'A' as u32))),
                '0'..='9' => Some(Self(VK_0 + (c as u32 - '0' as u32))),
                _ => None,
            };
        }

        if let Some(digit) = upper.strip_prefix("NUMPAD") {
            return match digit.parse::<u32>() {
                Ok(n) if n <= 9 && digit.len() == 1 => Some(Self(VK_NUMPAD0 + n)),
                _ => None,
            };
        }

        if let Some(num) = upper.strip_prefix('F') {
            return match num.parse::<u32>() {
                Ok(n) if (1..=MAX_F_KEY).contains(&n) && !num.starts_with('0') => {
                    Some(Self(VK_F1 + n - 1))
                }
                _ => None,
            };
        }

        None
    }

    /// Canonical spelling.
    pub fn name(self) -> String {
        let vk = self.0;
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, v)| *v == vk) {
            return (*name).to_string();
        }
        match vk {
            v if (VK_A..VK_A + 26).contains(&v) => char::from(b'A' + (v - VK_A) as u8).to_string(),
            v if (VK_0..VK_0 + 10).contains(&v) => char::from(b'0' + (v - VK_0) as u8).to_string(),
            v if (VK_NUMPAD0..VK_NUMPAD0 + 10).contains(&v) => format!("NumPad{}", v - VK_NUMPAD0),
            v if (VK_F1..VK_F1 + MAX_F_KEY).contains(&v) => format!("F{}", v - VK_F1 + 1),
            v => format!("VK{:#04X}", v),
        }
    }
}

fn parse_modifier(token: &str) -> Option<Modifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" => Some(Modifiers::CONTROL),
        "alt" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        _ => None,
    }
}

/// A parsed global hotkey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Combo {
    pub modifiers: Modifiers,
    pub key: KeyCode,
}

impl Combo {
    pub fn parse(input: &str) -> Result<Self, HotkeyError> {
        let fail = |reason: String| HotkeyError::Parse {
            combo: input.to_string(),
            reason,
        };

        let tokens: Vec<&str> = input.split('+').map(str::trim).collect();
        let Some((last, leading)) = tokens.split_last() else {
            return Err(fail("empty combo".to_string()));
        };

        let mut modifiers = Modifiers::empty();
        for token in leading {
            if token.is_empty() {
                return Err(fail("empty token".to_string()));
            }
            match parse_modifier(token) {
                Some(m) => modifiers |= m,
                None => return Err(fail(format!("'{}' is not a modifier", token))),
            }
        }

        if last.is_empty() {
            return Err(fail("missing key".to_string()));
        }
        if parse_modifier(last).is_some() {
            return Err(fail("combo must end with a key".to_string()));
        }
        let key = KeyCode::from_name(last).ok_or_else(|| fail(format!("unknown key '{}'", last)))?;

        Ok(Self { modifiers, key })
    }
}

impl FromStr for Combo {
    type Err = HotkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(Modifiers::CONTROL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(Modifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(Modifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        f.write_str(&self.key.name())
    }
}
