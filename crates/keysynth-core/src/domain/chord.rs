//! Local chord detection: the menu-toggle chord and Ctrl+Alt+End → Delete.
//!
//! The detector watches every local key-down/key-up (whether or not the event
//! is later forwarded) and decides, per event, what the remote session should
//! see.  It never sends anything itself; callers act on the returned outcome.
//!
//! # Chords
//!
//! - **Menu toggle** – Ctrl+Alt+Shift with nothing else held.  The triggering
//!   press is swallowed, the held modifiers are released on the remote side,
//!   local press state is cleared and the menu flag is inverted.
//! - **Delete substitution** – End (or keypad End) while Ctrl and Alt are held.
//!   Browsers and host OSes intercept Ctrl+Alt+Delete, so users press
//!   Ctrl+Alt+End instead and the remote session receives Delete.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::press_state::PressState;
use crate::domain::substitution::SubstitutionTable;
use crate::keysym::Keysym;

/// The physical variants of one logical key (left/right/alternate keysyms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet(BTreeSet<Keysym>);

impl AliasSet {
    pub fn new(keys: impl IntoIterator<Item = Keysym>) -> Self {
        Self(keys.into_iter().collect())
    }

    pub fn contains(&self, code: Keysym) -> bool {
        self.0.contains(&code)
    }

    /// `true` if at least one member is currently held.
    pub fn any_held(&self, state: &PressState) -> bool {
        self.0.iter().any(|k| state.is_held(*k))
    }

    pub fn iter(&self) -> impl Iterator<Item = Keysym> + '_ {
        self.0.iter().copied()
    }
}

/// Immutable key configuration for the chord detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordKeys {
    pub shift: AliasSet,
    pub alt: AliasSet,
    pub ctrl: AliasSet,
    pub end: AliasSet,
    /// Keysym sent in place of End when the delete chord fires.
    pub delete: Keysym,
}

impl ChordKeys {
    /// `true` if `code` belongs to Shift, Alt or Ctrl.
    pub fn is_menu_modifier(&self, code: Keysym) -> bool {
        self.shift.contains(code) || self.alt.contains(code) || self.ctrl.contains(code)
    }
}

impl Default for ChordKeys {
    /// The X11 keysyms a browser keyboard reports for each modifier.
    fn default() -> Self {
        Self {
            shift: AliasSet::new([Keysym::SHIFT_L, Keysym::SHIFT_R]),
            alt: AliasSet::new([
                Keysym::ALT_L,
                Keysym::ALT_R,
                Keysym::ISO_LEVEL3_SHIFT,
                Keysym::META_L,
                Keysym::META_R,
            ]),
            ctrl: AliasSet::new([Keysym::CONTROL_L, Keysym::CONTROL_R]),
            end: AliasSet::new([Keysym::END, Keysym::KP_END]),
            delete: Keysym::DELETE,
        }
    }
}

/// What to do with an observed key-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyDownOutcome {
    /// Send the press unchanged.
    Forward(Keysym),
    /// Do not send anything (menu is open).
    Suppress,
    /// The menu chord fired.  Swallow the press, send a release for every key
    /// in `release`, and invert the menu flag.
    ToggleMenu { release: Vec<Keysym> },
    /// Swallow the press and send a press of `sent` instead.
    Substitute { sent: Keysym },
}

/// What to do with an observed key-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyUpOutcome {
    /// Send the release unchanged.
    Forward(Keysym),
    /// Do not send anything (menu is open).
    Suppress,
    /// Swallow the release and send a release of `sent` instead.
    Substitute { sent: Keysym },
}

/// Tracks local key state and recognises the two chords.
#[derive(Debug, Clone)]
pub struct ChordDetector {
    keys: ChordKeys,
    pressed: PressState,
    substitutions: SubstitutionTable,
}

impl ChordDetector {
    pub fn new(keys: ChordKeys) -> Self {
        Self {
            keys,
            pressed: PressState::new(),
            substitutions: SubstitutionTable::new(),
        }
    }

    pub fn keys(&self) -> &ChordKeys {
        &self.keys
    }

    pub fn press_state(&self) -> &PressState {
        &self.pressed
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Observes a local key-down.
    ///
    /// `menu_shown` is the menu state *before* this event.  While the menu is
    /// shown every press is suppressed, but it is still recorded so the chord
    /// that closes the menu can be recognised.
    ///
    /// When the chord fires, every held key whose press went out is released.
    /// The trigger is left out only on its first press; a repeated key-down
    /// of a key already held was forwarded earlier and is released too.
    pub fn on_key_down(&mut self, code: Keysym, menu_shown: bool) -> KeyDownOutcome {
        let fresh = self.pressed.press(code);

        if self.is_menu_chord_held() {
            let release: Vec<Keysym> = if menu_shown {
                self.pressed.clear();
                Vec::new()
            } else {
                self.pressed
                    .clear()
                    .into_iter()
                    .filter(|k| !(fresh && *k == code))
                    .collect()
            };
            debug!(trigger = %code, released = release.len(), "menu chord fired");
            return KeyDownOutcome::ToggleMenu { release };
        }

        if menu_shown {
            return KeyDownOutcome::Suppress;
        }

        if self.keys.end.contains(code)
            && self.keys.alt.any_held(&self.pressed)
            && self.keys.ctrl.any_held(&self.pressed)
        {
            let sent = self.keys.delete;
            if let Some(previous) = self.substitutions.record(code, sent) {
                debug!(physical = %code, %previous, "overwriting live substitution");
            }
            debug!(physical = %code, %sent, "delete chord fired");
            return KeyDownOutcome::Substitute { sent };
        }

        KeyDownOutcome::Forward(code)
    }

    /// Observes a local key-up.
    ///
    /// A pending substitution is always resolved, even while the menu is
    /// shown, so the substituted key is never left held on the remote side.
    pub fn on_key_up(&mut self, code: Keysym, menu_shown: bool) -> KeyUpOutcome {
        self.pressed.release(code);

        if let Some(sent) = self.substitutions.take(code) {
            debug!(physical = %code, %sent, "releasing substituted key");
            return KeyUpOutcome::Substitute { sent };
        }

        if menu_shown {
            return KeyUpOutcome::Suppress;
        }

        KeyUpOutcome::Forward(code)
    }

    /// Drops the substitution recorded for `physical`, e.g. because its
    /// substitute press could not be delivered.  The matching key-up is then
    /// treated like any other key.
    pub fn discard_substitution(&mut self, physical: Keysym) -> Option<Keysym> {
        self.substitutions.take(physical)
    }

    /// Forgets all held keys and pending substitutions, returning the
    /// keysyms that were sent on behalf of still-held physical keys.
    ///
    /// Used when the focused session goes away mid-chord.
    pub fn reset(&mut self) -> Vec<Keysym> {
        self.pressed.clear();
        self.substitutions.clear()
    }

    /// Nothing outside Shift/Alt/Ctrl is held, and one of each is.
    fn is_menu_chord_held(&self) -> bool {
        let keys = &self.keys;
        self.pressed.held().all(|k| keys.is_menu_modifier(k))
            && keys.shift.any_held(&self.pressed)
            && keys.alt.any_held(&self.pressed)
            && keys.ctrl.any_held(&self.pressed)
    }
}

impl Default for ChordDetector {
    fn default() -> Self {
        Self::new(ChordKeys::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
