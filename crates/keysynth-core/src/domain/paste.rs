//! Paste encoding: clipboard text → ordered key events.
//!
//! # Bracketed paste (for beginners)
//!
//! Terminals cannot tell typed input from pasted input.  A shell that sees a
//! pasted newline will happily execute half of a multi-line snippet.  The
//! *bracketed paste* convention fixes this: the pasted text is wrapped in
//! `ESC [ 2 0 0 ~` … `ESC [ 2 0 1 ~` so the receiving program can treat the
//! block as one unit.
//!
//! We have no terminal escape channel, only key events, so each marker is
//! "typed" as six keystrokes (`Escape`, `[`, `2`, `0`, `0`/`1`, `~`), exactly as
//! a physical keyboard would produce them.  Markers are only added when the
//! text contains a line break; single-line text is typed as-is.

use crate::domain::event::KeyEvent;
use crate::keysym::Keysym;

/// Escape sequence announcing the start of a bracketed paste.
pub const BRACKETED_PASTE_START: &str = "\x1b[200~";

/// Escape sequence announcing the end of a bracketed paste.
pub const BRACKETED_PASTE_END: &str = "\x1b[201~";

/// Encoded paste: optional framing markers plus the typed body.
///
/// The markers are kept apart from the body so the dispatcher can send the
/// leading marker with the first batch and the trailing marker right after
/// the last one, without counting them against the batch size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteSequence {
    start_marker: Vec<KeyEvent>,
    keys: Vec<KeyEvent>,
    end_marker: Vec<KeyEvent>,
}

impl PasteSequence {
    /// Encodes `text` into a press/release pair per mappable character,
    /// wrapping the result in bracketed-paste markers when `text` contains
    /// a line feed or carriage return.
    pub fn from_text(text: &str) -> Self {
        let keys = strokes(text);
        if keys.is_empty() || !is_multi_line(text) {
            return Self {
                keys,
                ..Self::default()
            };
        }

        Self {
            start_marker: strokes(BRACKETED_PASTE_START),
            keys,
            end_marker: strokes(BRACKETED_PASTE_END),
        }
    }

    /// `true` when the sequence is wrapped in bracketed-paste markers.
    pub fn is_bracketed(&self) -> bool {
        !self.start_marker.is_empty()
    }

    /// The typed body without markers.
    pub fn keys(&self) -> &[KeyEvent] {
        &self.keys
    }

    /// Total number of events, markers included.
    pub fn len(&self) -> usize {
        self.start_marker.len() + self.keys.len() + self.end_marker.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens the sequence into the order it is sent on the wire.
    pub fn into_events(self) -> Vec<KeyEvent> {
        let mut events = self.start_marker;
        events.extend(self.keys);
        events.extend(self.end_marker);
        events
    }
}

/// Encodes `text` into the flat, ordered event sequence a paste produces.
///
/// Equivalent to `PasteSequence::from_text(text).into_events()`.
pub fn encode_paste(text: &str) -> Vec<KeyEvent> {
    PasteSequence::from_text(text).into_events()
}

fn is_multi_line(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

/// One press immediately followed by one release per mappable character, so
/// the remote side never sees a held key long enough to auto-repeat.
fn strokes(text: &str) -> Vec<KeyEvent> {
    text.chars()
        .filter_map(Keysym::from_char)
        .flat_map(KeyEvent::stroke)
        .collect()
}

// ── Paste job ─────────────────────────────────────────────────────────────────

/// A paste in flight: the events to send plus a forward-only cursor.
///
/// The job is consumed in three phases: [`take_leading`](Self::take_leading),
/// repeated [`next_batch`](Self::next_batch) calls, and
/// [`take_trailing`](Self::take_trailing).  Events already handed out are never
/// handed out again.
///
/// A job built from a [`PasteSequence`] never splits a keystroke: its batches
/// always end on a release, so no key is left held across a batch delay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteJob {
    leading: Vec<KeyEvent>,
    body: Vec<KeyEvent>,
    trailing: Vec<KeyEvent>,
    cursor: usize,
    whole_strokes: bool,
}

impl PasteJob {
    /// A job with no framing; every event is part of the batched body.
    pub fn from_events(events: Vec<KeyEvent>) -> Self {
        Self {
            body: events,
            ..Self::default()
        }
    }

    /// Returns the leading framing, leaving it empty.
    pub fn take_leading(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.leading)
    }

    /// Returns the next `batch_size` body events and advances the cursor, or
    /// `None` once the body is exhausted.  A `batch_size` of 0 is treated as 1.
    ///
    /// For keystroke jobs an odd `batch_size` is rounded up to the next even
    /// number so each press travels with its release.
    pub fn next_batch(&mut self, batch_size: usize) -> Option<&[KeyEvent]> {
        if self.cursor >= self.body.len() {
            return None;
        }
        let mut size = batch_size.max(1);
        if self.whole_strokes && size % 2 == 1 {
            size += 1;
        }
        let start = self.cursor;
        let end = (start + size).min(self.body.len());
        self.cursor = end;
        Some(&self.body[start..end])
    }

    /// `true` while body events remain behind the cursor.
    pub fn has_pending_body(&self) -> bool {
        self.cursor < self.body.len()
    }

    /// Returns the trailing framing, leaving it empty.
    pub fn take_trailing(&mut self) -> Vec<KeyEvent> {
        std::mem::take(&mut self.trailing)
    }

    /// Events not yet handed out, framing included.
    pub fn remaining(&self) -> usize {
        self.leading.len() + (self.body.len() - self.cursor) + self.trailing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

impl From<PasteSequence> for PasteJob {
    fn from(seq: PasteSequence) -> Self {
        Self {
            leading: seq.start_marker,
            body: seq.keys,
            trailing: seq.end_marker,
            cursor: 0,
            whole_strokes: true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
