//! Local keyboard state: which keysyms are currently held down.

use std::collections::HashSet;

use crate::keysym::Keysym;

/// Set of keys observed pressed and not yet released.
///
/// Only the chord detector mutates this, and only from observed local
/// key-down/key-up events (or by clearing it when a chord consumes the held
/// modifiers).  A key is never reported held without an unmatched press.
#[derive(Debug, Clone, Default)]
pub struct PressState {
    held: HashSet<Keysym>,
}

impl PressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a key-down.  Returns `false` if the key was already held
    /// (an auto-repeat).
    pub fn press(&mut self, code: Keysym) -> bool {
        self.held.insert(code)
    }

    /// Records a key-up.  Returns `true` if the key was held.
    pub fn release(&mut self, code: Keysym) -> bool {
        self.held.remove(&code)
    }

    pub fn is_held(&self, code: Keysym) -> bool {
        self.held.contains(&code)
    }

    /// Iterates over held keys in no particular order.
    pub fn held(&self) -> impl Iterator<Item = Keysym> + '_ {
        self.held.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Forgets every held key and returns them, sorted for stable output.
    pub fn clear(&mut self) -> Vec<Keysym> {
        let mut keys: Vec<Keysym> = self.held.drain().collect();
        keys.sort_unstable();
        keys
    }
}
