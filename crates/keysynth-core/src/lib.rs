//! # keysynth-core
//!
//! Pure rules for synthesising keyboard input on a remote desktop session.
//!
//! This crate has no async runtime, no I/O and no clock.  It answers questions
//! such as "which keysym does `é` map to?", "what key events does this
//! clipboard text become?" and "does this key-down complete a chord?".  The
//! `keysynth-session` crate turns the answers into events sent to a session.
//!
//! # Architecture overview (for beginners)
//!
//! A remote desktop client running in a browser receives local keyboard and
//! touch input and has to forward it to a remote machine that speaks the X11
//! keyboard model.  Three things make that more than a straight pass-through:
//!
//! - **Pasting** – the remote side has no clipboard API we can reach, so text is
//!   "typed" as press/release pairs, wrapped in bracketed-paste markers when it
//!   spans several lines.
//! - **Chords** – Ctrl+Alt+Shift opens a local menu instead of reaching the
//!   remote side, and Ctrl+Alt+End is turned into Ctrl+Alt+Delete because the
//!   local OS swallows the real thing.
//! - **Gestures** – on touch devices the menu is shown and hidden with edge
//!   swipes.
//!
//! The crate is split into:
//!
//! - **`keysym`** – the [`Keysym`] newtype, the code point mapping and key names.
//! - **`domain`** – key events, paste encoding, chord detection, menu state and
//!   gesture rules.

pub mod domain;
pub mod keysym;

// Re-export the most-used types so callers can write `keysynth_core::Keysym`.
pub use domain::chord::{AliasSet, ChordDetector, ChordKeys, KeyDownOutcome, KeyUpOutcome};
pub use domain::event::KeyEvent;
pub use domain::gesture::{DragGesture, GestureController, GestureThresholds};
pub use domain::menu::{MenuState, MenuTransition, ScrollOffset};
pub use domain::paste::{
    encode_paste, PasteJob, PasteSequence, BRACKETED_PASTE_END, BRACKETED_PASTE_START,
};
pub use domain::press_state::PressState;
pub use domain::substitution::SubstitutionTable;
pub use keysym::{map_code_point, Keysym, KeysymParseError};
