//! Recording key sink for tests.
//!
//! The `RecordingKeySink` stores every event it receives together with the
//! (tokio) instant it arrived, so tests can assert both *what* was sent and
//! *when*.  Under `#[tokio::test(start_paused = true)]` the instants come from
//! the paused clock: events sent in the same batch share an instant and each
//! inter-batch sleep shows up as an exact gap.
//!
//! # Failure injection
//!
//! - [`RecordingKeySink::failing`] rejects every event.
//! - [`RecordingKeySink::failing_on`] rejects events for one keysym only,
//!   which lets tests abort a paste part-way through.

use std::sync::{Mutex, PoisonError};

use keysynth_core::{KeyEvent, Keysym};
use tokio::time::Instant;

use crate::application::synthesize_input::{KeyEventSink, SinkError};

/// One recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentEvent {
    pub event: KeyEvent,
    pub at: Instant,
}

/// A sink that records events in memory instead of sending them anywhere.
#[derive(Debug, Default)]
pub struct RecordingKeySink {
    sent: Mutex<Vec<SentEvent>>,
    /// When `true`, every call returns [`SinkError::Transport`].
    pub should_fail: bool,
    fail_on: Option<Keysym>,
}

impl RecordingKeySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn failing_on(code: Keysym) -> Self {
        Self {
            fail_on: Some(code),
            ..Self::default()
        }
    }

    /// Recorded events in arrival order.
    pub fn events(&self) -> Vec<KeyEvent> {
        self.lock().iter().map(|s| s.event).collect()
    }

    /// Recorded events with their arrival instants.
    pub fn sent(&self) -> Vec<SentEvent> {
        self.lock().clone()
    }

    /// Groups recorded events by arrival instant, i.e. into the batches they
    /// were sent in.
    pub fn batches(&self) -> Vec<Vec<KeyEvent>> {
        let mut batches: Vec<(Instant, Vec<KeyEvent>)> = Vec::new();
        for sent in self.lock().iter() {
            match batches.last_mut() {
                Some((at, batch)) if *at == sent.at => batch.push(sent.event),
                _ => batches.push((sent.at, vec![sent.event])),
            }
        }
        batches.into_iter().map(|(_, batch)| batch).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SentEvent>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyEventSink for RecordingKeySink {
    fn send_key_event(&self, pressed: bool, code: Keysym) -> Result<(), SinkError> {
        if self.should_fail || self.fail_on == Some(code) {
            return Err(SinkError::Transport("mock failure".into()));
        }
        self.lock().push(SentEvent {
            event: KeyEvent { code, pressed },
            at: Instant::now(),
        });
        Ok(())
    }
}
