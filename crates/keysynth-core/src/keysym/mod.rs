//! Keysym values and the Unicode code point → keysym mapping.
//!
//! # What is a keysym? (for beginners)
//!
//! Remote desktop gateways that speak the X11 keyboard model (VNC, HTML5 gateways,
//! most RDP front ends) identify keys with a 32-bit **keysym** rather than a
//! physical scan code.  A keysym may name a *key* (Return, Control_L, End) or a
//! *character* (`a`, `é`, `€`):
//!
//! | Name        | Value        | Meaning                        |
//! |-------------|--------------|--------------------------------|
//! | `a`         | `0x0061`     | Latin-1 characters map 1:1     |
//! | `Return`    | `0xFF0D`     | Enter key                      |
//! | `Escape`    | `0xFF1B`     | control byte 0x1B, `0xFF00 \|` |
//! | `U+20AC`    | `0x010020AC` | Unicode keysym, `0x01000000 \|`|
//!
//! The mapping rules live in [`map_code_point`]; the symbolic names used for
//! logging and CLI parsing live in [`names`].

pub mod names;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest Unicode scalar value that has a keysym encoding.
const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Prefix applied to control characters (`0xFF00 | cp`).
const CONTROL_KEYSYM_BASE: u32 = 0xFF00;

/// Prefix applied to code points outside Latin-1 (`0x01000000 | cp`).
const UNICODE_KEYSYM_BASE: u32 = 0x0100_0000;

/// A key code in the remote protocol's keyboard namespace.
///
/// Serialises as a bare integer so that JSON output stays
/// `{"keysym": 65293, ...}` rather than a nested object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keysym(pub u32);

impl Keysym {
    pub const RETURN: Keysym = Keysym(0xFF0D);
    pub const ESCAPE: Keysym = Keysym(0xFF1B);
    pub const DELETE: Keysym = Keysym(0xFFFF);

    pub const END: Keysym = Keysym(0xFF57);
    pub const KP_END: Keysym = Keysym(0xFFB1);

    pub const SHIFT_L: Keysym = Keysym(0xFFE1);
    pub const SHIFT_R: Keysym = Keysym(0xFFE2);
    pub const CONTROL_L: Keysym = Keysym(0xFFE3);
    pub const CONTROL_R: Keysym = Keysym(0xFFE4);
    pub const META_L: Keysym = Keysym(0xFFE7);
    pub const META_R: Keysym = Keysym(0xFFE8);
    pub const ALT_L: Keysym = Keysym(0xFFE9);
    pub const ALT_R: Keysym = Keysym(0xFFEA);
    /// AltGr on most European layouts.
    pub const ISO_LEVEL3_SHIFT: Keysym = Keysym(0xFE03);

    /// Lowercase `l`, used by the clear-screen shortcut.
    pub const LOWER_L: Keysym = Keysym(0x006C);

    /// Returns the raw 32-bit value.
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Maps a `char` to its keysym.
    ///
    /// Every Rust `char` is a Unicode scalar value, so this never fails in
    /// practice; the `Option` mirrors [`map_code_point`].
    pub fn from_char(c: char) -> Option<Keysym> {
        map_code_point(c as u32)
    }

    /// Returns the symbolic name of well-known keysyms (e.g. `"Control_L"`).
    pub fn name(self) -> Option<&'static str> {
        names::name_of(self)
    }
}

impl From<u32> for Keysym {
    fn from(raw: u32) -> Self {
        Keysym(raw)
    }
}

impl fmt::Display for Keysym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} (0x{:04X})", self.0),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

/// Error returned when a keysym cannot be parsed from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeysymParseError {
    #[error("empty keysym")]
    Empty,

    #[error("invalid keysym '{0}': expected 0x-prefixed hex, decimal, or a known key name")]
    Invalid(String),
}

impl FromStr for Keysym {
    type Err = KeysymParseError;

    /// Accepts `0xFFE3`, `65507`, or a name from [`names`] such as `Control_L`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeysymParseError::Empty);
        }

        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return u32::from_str_radix(hex, 16)
                .map(Keysym)
                .map_err(|_| KeysymParseError::Invalid(s.to_string()));
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            return s
                .parse::<u32>()
                .map(Keysym)
                .map_err(|_| KeysymParseError::Invalid(s.to_string()));
        }

        names::from_name(s).ok_or_else(|| KeysymParseError::Invalid(s.to_string()))
    }
}

/// Translates a Unicode code point into the keysym a physical keyboard would
/// produce for it.
///
/// Rules are applied in order:
///
/// 1. Line feed or carriage return → [`Keysym::RETURN`].
/// 2. C0 (`0x00..=0x1F`) and C1/DEL (`0x7F..=0x9F`) controls → `0xFF00 | cp`.
/// 3. Remaining Latin-1 (`..=0xFF`) → the code point itself.
/// 4. Anything up to `0x10FFFF` → `0x01000000 | cp`.
/// 5. Otherwise `None`; callers skip the character.
pub fn map_code_point(code_point: u32) -> Option<Keysym> {
    match code_point {
        0x0A | 0x0D => Some(Keysym::RETURN),
        0x00..=0x1F | 0x7F..=0x9F => Some(Keysym(CONTROL_KEYSYM_BASE | code_point)),
        0x20..=0xFF => Some(Keysym(code_point)),
        0x100..=MAX_CODE_POINT => Some(Keysym(UNICODE_KEYSYM_BASE | code_point)),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
