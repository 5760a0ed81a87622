//! The atomic unit sent to a remote session: one key press or one release.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::keysym::Keysym;

/// A single key transition.
///
/// Events carry no identity; they are produced, sent once and discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    /// The key being pressed or released.
    pub code: Keysym,
    /// `true` for a press, `false` for a release.
    pub pressed: bool,
}

impl KeyEvent {
    pub fn press(code: Keysym) -> Self {
        Self { code, pressed: true }
    }

    pub fn release(code: Keysym) -> Self {
        Self {
            code,
            pressed: false,
        }
    }

    /// Returns the press/release pair that "types" `code` once.
    pub fn stroke(code: Keysym) -> [KeyEvent; 2] {
        [Self::press(code), Self::release(code)]
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.pressed { "↓" } else { "↑" };
        write!(f, "{}{arrow}", self.code)
    }
}
