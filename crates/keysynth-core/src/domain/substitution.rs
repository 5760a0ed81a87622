//! Bookkeeping for keys that were sent in place of a physical key.
//!
//! When Ctrl+Alt+End is turned into Ctrl+Alt+Delete, the remote side sees a
//! Delete press.  When the user later lets go of End, the remote side must see
//! a Delete *release*, not an End release, or Delete stays stuck down.  This
//! table remembers which keysym went out for each physical key until that key
//! is released.

use std::collections::HashMap;

use crate::keysym::Keysym;

/// Physical keysym → keysym actually sent on its behalf.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: HashMap<Keysym, Keysym>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `sent` was sent in place of `physical`.
    ///
    /// At most one entry exists per physical key; a second record before the
    /// key is released overwrites the first and the previous value is returned.
    pub fn record(&mut self, physical: Keysym, sent: Keysym) -> Option<Keysym> {
        self.entries.insert(physical, sent)
    }

    /// Removes and returns the substitute for `physical`, if any.
    pub fn take(&mut self, physical: Keysym) -> Option<Keysym> {
        self.entries.remove(&physical)
    }

    pub fn get(&self, physical: Keysym) -> Option<Keysym> {
        self.entries.get(&physical).copied()
    }

    /// Drops every entry, returning the distinct substituted keysyms.
    pub fn clear(&mut self) -> Vec<Keysym> {
        let mut sent: Vec<Keysym> = self.entries.drain().map(|(_, sent)| sent).collect();
        sent.sort_unstable();
        sent.dedup();
        sent
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
