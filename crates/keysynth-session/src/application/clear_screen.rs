//! Clear-screen action: sends Ctrl+L to the focused session.
//!
//! The keystrokes go through the session's dispatcher rather than straight to
//! the sink, so they land after any paste still being typed.

use keysynth_core::{KeyEvent, Keysym, PasteJob};
use tracing::debug;

use crate::application::dispatch_keys::DispatchError;
use crate::application::session::RemoteSession;

/// `Ctrl↓ l↓ l↑ Ctrl↑`.
pub fn clear_screen_events() -> Vec<KeyEvent> {
    vec![
        KeyEvent::press(Keysym::CONTROL_L),
        KeyEvent::press(Keysym::LOWER_L),
        KeyEvent::release(Keysym::LOWER_L),
        KeyEvent::release(Keysym::CONTROL_L),
    ]
}

/// Queues Ctrl+L on `session`.  Does nothing when no session is focused.
///
/// # Errors
///
/// Returns [`DispatchError::Closed`] if the session has been closed.
pub fn clear_screen(session: Option<&RemoteSession>) -> Result<(), DispatchError> {
    let Some(session) = session else {
        debug!("no focused session; clear-screen ignored");
        return Ok(());
    };
    debug!(session = %session.id(), "queueing clear-screen");
    session.enqueue(PasteJob::from_events(clear_screen_events()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch_keys::DispatchConfig;
    use crate::infrastructure::key_sink::mock::RecordingKeySink;
    use keysynth_core::PasteSequence;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_screen_sends_ctrl_l() {
        let sink = Arc::new(RecordingKeySink::new());
        let session = RemoteSession::open(sink.clone(), DispatchConfig::default());

        clear_screen(Some(&session)).unwrap();
        session.finish().await.unwrap();

        assert_eq!(
            sink.events()
                .iter()
                .map(|e| (e.pressed, e.code.raw()))
                .collect::<Vec<_>>(),
            vec![(true, 0xFFE3), (true, 0x006C), (false, 0x006C), (false, 0xFFE3)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_screen_waits_for_paste_in_flight() {
        // Arrange
        let sink = Arc::new(RecordingKeySink::new());
        let session = RemoteSession::open(sink.clone(), DispatchConfig::default());
        let paste = PasteSequence::from_text("echo hello world");
        let mut expected = paste.clone().into_events();
        expected.extend(clear_screen_events());

        // Act
        session.enqueue(PasteJob::from(paste)).unwrap();
        clear_screen(Some(&session)).unwrap();
        session.finish().await.unwrap();

        // Assert
        assert_eq!(sink.events(), expected);
    }

    #[test]
    fn test_no_session_is_a_no_op() {
        assert!(clear_screen(None).is_ok());
    }
}
