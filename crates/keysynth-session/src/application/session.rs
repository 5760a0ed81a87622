//! RemoteSession: a focused remote session's sink plus its dispatcher.

use std::fmt;
use std::sync::Arc;

use keysynth_core::PasteJob;
use tracing::info;
use uuid::Uuid;

use crate::application::dispatch_keys::{BatchDispatcher, DispatchConfig, DispatchError};
use crate::application::synthesize_input::KeyEventSink;

/// Handle to one remote session.
///
/// Owns the session's [`BatchDispatcher`].  Closing or dropping the handle
/// cancels the dispatcher, so no queued paste keeps typing into a session
/// that has gone away.
pub struct RemoteSession {
    id: Uuid,
    sink: Arc<dyn KeyEventSink>,
    dispatcher: BatchDispatcher,
}

impl RemoteSession {
    /// Opens a session on the current Tokio runtime.
    pub fn open(sink: Arc<dyn KeyEventSink>, config: DispatchConfig) -> Self {
        Self::with_id(Uuid::new_v4(), sink, config)
    }

    /// Opens a session with a caller-chosen id.
    pub fn with_id(id: Uuid, sink: Arc<dyn KeyEventSink>, config: DispatchConfig) -> Self {
        let dispatcher = BatchDispatcher::spawn(Arc::clone(&sink), config);
        info!(session = %id, batch_size = config.batch_size, "session opened");
        Self {
            id,
            sink,
            dispatcher,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The sink for events that bypass the dispatcher (forwarded key presses).
    pub fn sink(&self) -> &dyn KeyEventSink {
        self.sink.as_ref()
    }

    /// Queues `job` behind any paste already in flight.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Closed`] once the session has been closed.
    pub fn enqueue(&self, job: PasteJob) -> Result<(), DispatchError> {
        self.dispatcher.enqueue(job)
    }

    pub fn is_open(&self) -> bool {
        self.dispatcher.is_running()
    }

    /// Stops pending pastes; later `enqueue` calls fail.
    pub fn close(&mut self) {
        if self.dispatcher.is_running() {
            info!(session = %self.id, "session closed");
        }
        self.dispatcher.cancel();
    }

    /// Waits for every queued paste to be sent, then closes the session.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Worker`] if the dispatcher task panicked.
    pub async fn finish(self) -> Result<(), DispatchError> {
        let id = self.id;
        self.dispatcher.finish().await?;
        info!(session = %id, "session finished");
        Ok(())
    }
}

impl fmt::Debug for RemoteSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSession")
            .field("id", &self.id)
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}
