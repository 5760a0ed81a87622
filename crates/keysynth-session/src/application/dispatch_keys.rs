//! BatchDispatcher: sends paste jobs to a session in rate-limited batches.
//!
//! Remote gateways drop or reorder input when thousands of key events arrive
//! at once, so a long paste is sent `batch_size` events at a time with a short
//! sleep in between.
//!
//! # Task layout (for beginners)
//!
//! ```text
//!  enqueue(job) ──► mpsc queue ──► worker task ──► KeyEventSink
//!                                     │
//!                                sleep(delay) between batches
//! ```
//!
//! The worker is a single Tokio task, so jobs are sent strictly one after the
//! other (FIFO) and never interleave.  Its `JoinHandle` is kept so the task can
//! be aborted: `cancel()` and `Drop` both abort it, which cancels the task at
//! its next suspension point (the inter-batch sleep or the wait for the next
//! job) and discards whatever is left.

use std::sync::Arc;
use std::time::Duration;

use keysynth_core::{KeyEvent, PasteJob};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, trace, warn};

use crate::application::synthesize_input::{KeyEventSink, SinkError};

/// Default number of body events sent per batch.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Default pause between two batches.
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(5);

/// Error type for dispatcher operations.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatcher is no longer accepting jobs")]
    Closed,
    #[error("dispatch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Rate-limiting settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Body events per batch.  `0` is treated as `1`.  Paste jobs round an
    /// odd size up so a keystroke is never split across batches.
    pub batch_size: usize,
    /// Pause between batches.  Not applied after the last batch.
    pub batch_delay: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
        }
    }
}

/// Owns the worker task that sends queued [`PasteJob`]s to one sink.
pub struct BatchDispatcher {
    queue: Option<mpsc::UnboundedSender<PasteJob>>,
    worker: Option<JoinHandle<()>>,
}

impl BatchDispatcher {
    /// Spawns the worker on the current Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn spawn(sink: Arc<dyn KeyEventSink>, config: DispatchConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(sink, config, rx));
        Self {
            queue: Some(tx),
            worker: Some(worker),
        }
    }

    /// Queues `job` behind any job already in flight.  Empty jobs are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Closed`] after [`cancel`](Self::cancel) or once
    /// the worker has stopped.
    pub fn enqueue(&self, job: PasteJob) -> Result<(), DispatchError> {
        let queue = self.queue.as_ref().ok_or(DispatchError::Closed)?;
        if job.is_empty() {
            return Ok(());
        }
        queue.send(job).map_err(|_| DispatchError::Closed)
    }

    /// Aborts the worker.  Queued jobs and the rest of the job in flight are
    /// discarded; no further events reach the sink.
    pub fn cancel(&mut self) {
        self.queue = None;
        if let Some(worker) = self.worker.take() {
            worker.abort();
            debug!("dispatch worker cancelled");
        }
    }

    /// `true` until the dispatcher is cancelled or its worker exits.
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Stops accepting jobs and waits for every queued job to be sent.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Worker`] if the worker task panicked.
    pub async fn finish(mut self) -> Result<(), DispatchError> {
        self.queue = None;
        match self.worker.take() {
            Some(worker) => Ok(worker.await?),
            None => Ok(()),
        }
    }
}

impl Drop for BatchDispatcher {
    fn drop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

async fn run_worker(
    sink: Arc<dyn KeyEventSink>,
    config: DispatchConfig,
    mut queue: mpsc::UnboundedReceiver<PasteJob>,
) {
    while let Some(job) = queue.recv().await {
        let total = job.remaining();
        match send_job(sink.as_ref(), &config, job).await {
            Ok(sent) => debug!(sent, "paste job sent"),
            Err((sent, e)) => warn!(sent, total, "paste job aborted: {e}"),
        }
    }
    debug!("dispatch queue closed; worker exiting");
}

/// Sends one job: leading framing with the first batch, then the body in
/// batches separated by `batch_delay`, then the trailing framing right after
/// the last batch.
///
/// Returns the number of events sent, or that number plus the sink error that
/// stopped the job.
async fn send_job(
    sink: &dyn KeyEventSink,
    config: &DispatchConfig,
    mut job: PasteJob,
) -> Result<usize, (usize, SinkError)> {
    let mut sent = 0;

    let leading = job.take_leading();
    send_all(sink, &leading, &mut sent)?;

    while let Some(batch) = job.next_batch(config.batch_size) {
        trace!(len = batch.len(), "sending batch");
        send_all(sink, batch, &mut sent)?;
        if !job.has_pending_body() {
            break;
        }
        sleep(config.batch_delay).await;
    }

    let trailing = job.take_trailing();
    send_all(sink, &trailing, &mut sent)?;

    Ok(sent)
}

fn send_all(
    sink: &dyn KeyEventSink,
    events: &[KeyEvent],
    sent: &mut usize,
) -> Result<(), (usize, SinkError)> {
    for event in events {
        sink.send(*event).map_err(|e| (*sent, e))?;
        *sent += 1;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
