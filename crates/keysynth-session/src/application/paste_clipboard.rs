//! PasteClipboardUseCase: types the local clipboard into the focused session.
//!
//! The clipboard is read through the [`ClipboardProvider`] trait so the use
//! case never touches an OS clipboard API directly.  Reading is async because
//! real clipboard APIs (browser permissions prompts, X11 selections) answer
//! asynchronously.
//!
//! # Failure handling
//!
//! Nothing here is fatal.  An unreadable or non-text clipboard abandons the
//! paste with a warning, no focused session makes it a no-op, and empty text
//! dispatches nothing.  The outcome is reported as a [`PasteOutcome`].

use std::sync::Arc;

use async_trait::async_trait;
use keysynth_core::{PasteJob, PasteSequence};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::session::RemoteSession;

/// What the clipboard currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardContent {
    Text(String),
    /// Anything that is not text (images, files, raw bytes).
    NonText { mime_type: String },
}

/// Error type for clipboard reads.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("I/O error reading clipboard: {0}")]
    Io(#[from] std::io::Error),
}

/// Source of local clipboard content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClipboardProvider: Send + Sync {
    async fn read_text(&self) -> Result<ClipboardContent, ClipboardError>;
}

/// Result of one paste request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasteOutcome {
    /// A job with `events` key events was queued.
    Queued { events: usize, bracketed: bool },
    /// The clipboard text produced no key events.
    Empty,
    /// No session is focused.
    NoSession,
    /// The clipboard holds something other than text.
    NotText,
    /// The clipboard could not be read.
    Unavailable,
    /// The session stopped accepting jobs.
    SessionClosed,
}

/// The Paste Clipboard use case.
pub struct PasteClipboardUseCase {
    clipboard: Arc<dyn ClipboardProvider>,
}

impl PasteClipboardUseCase {
    pub fn new(clipboard: Arc<dyn ClipboardProvider>) -> Self {
        Self { clipboard }
    }

    /// Reads the clipboard and queues its text on `session`.
    pub async fn paste(&self, session: Option<&RemoteSession>) -> PasteOutcome {
        let text = match self.clipboard.read_text().await {
            Ok(ClipboardContent::Text(text)) => text,
            Ok(ClipboardContent::NonText { mime_type }) => {
                warn!(%mime_type, "clipboard does not hold text; paste abandoned");
                return PasteOutcome::NotText;
            }
            Err(e) => {
                warn!("paste abandoned: {e}");
                return PasteOutcome::Unavailable;
            }
        };

        let Some(session) = session else {
            debug!("no focused session; paste ignored");
            return PasteOutcome::NoSession;
        };

        let sequence = PasteSequence::from_text(&text);
        if sequence.is_empty() {
            debug!("clipboard text produced no key events");
            return PasteOutcome::Empty;
        }

        let events = sequence.len();
        let bracketed = sequence.is_bracketed();
        if let Err(e) = session.enqueue(PasteJob::from(sequence)) {
            warn!(session = %session.id(), "paste abandoned: {e}");
            return PasteOutcome::SessionClosed;
        }

        info!(session = %session.id(), events, bracketed, "paste queued");
        PasteOutcome::Queued { events, bracketed }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
