//! Domain rules for remote input synthesis.
//!
//! Everything here is synchronous and side-effect free apart from the state
//! it owns.  Nothing in this module talks to a remote session, a clipboard or
//! a clock; the `keysynth-session` crate wires these rules to those.
//!
//! # How the pieces fit together (for beginners)
//!
//! ```text
//!  local key-down/up ──► ChordDetector ──► KeyDownOutcome / KeyUpOutcome
//!                          │    │
//!                  PressState  SubstitutionTable
//!
//!  clipboard text ──► PasteSequence ──► PasteJob ──► batches of KeyEvent
//!
//!  drag callback ──► GestureController ──► MenuState (shown / scroll)
//! ```

pub mod chord;
pub mod event;
pub mod gesture;
pub mod menu;
pub mod paste;
pub mod press_state;
pub mod substitution;
