//! InputSynthesizer: turns local key and drag events into remote key events.
//!
//! This use case owns the chord detector, the gesture controller and the menu
//! state.  It never holds a session itself; every key handler receives the
//! focused session's [`KeyEventSink`] (or `None` when nothing is focused), so
//! local state is still tracked while no remote session is attached.

use keysynth_core::{
    ChordDetector, ChordKeys, DragGesture, GestureController, GestureThresholds, KeyDownOutcome,
    KeyEvent, KeyUpOutcome, Keysym, MenuState, MenuTransition, ScrollOffset,
};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

/// Error type for key event delivery.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("session sink is closed")]
    Closed,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Receives primitive key events for one remote session.
///
/// Implementations must deliver events in call order.
pub trait KeyEventSink: Send + Sync {
    fn send_key_event(&self, pressed: bool, code: Keysym) -> Result<(), SinkError>;

    /// Sends a [`KeyEvent`].
    fn send(&self, event: KeyEvent) -> Result<(), SinkError> {
        self.send_key_event(event.pressed, event.code)
    }
}

/// The Input Synthesizer use case.
pub struct InputSynthesizer {
    detector: ChordDetector,
    gestures: GestureController,
    menu: MenuState,
    menu_tx: watch::Sender<bool>,
}

impl InputSynthesizer {
    pub fn new(keys: ChordKeys, thresholds: GestureThresholds) -> Self {
        let (menu_tx, _) = watch::channel(false);
        Self {
            detector: ChordDetector::new(keys),
            gestures: GestureController::new(thresholds),
            menu: MenuState::new(),
            menu_tx,
        }
    }

    /// Handles a local key-down.
    ///
    /// With `sink == None` the chord state still updates (including menu
    /// toggles) but nothing is sent, and the delete chord records no
    /// substitution.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink rejects an event.  Local state has
    /// already been updated when this happens.
    pub fn handle_key_down(
        &mut self,
        sink: Option<&dyn KeyEventSink>,
        code: Keysym,
    ) -> Result<KeyDownOutcome, SinkError> {
        let outcome = self.detector.on_key_down(code, self.menu.is_shown());

        match &outcome {
            KeyDownOutcome::Forward(code) => send(sink, KeyEvent::press(*code))?,
            KeyDownOutcome::Suppress => {}
            KeyDownOutcome::ToggleMenu { release } => {
                let transition = self.menu.toggle();
                self.publish(transition);
                for key in release {
                    send(sink, KeyEvent::release(*key))?;
                }
            }
            KeyDownOutcome::Substitute { sent } => match sink {
                Some(sink) => sink.send(KeyEvent::press(*sent))?,
                None => {
                    debug!(physical = %code, "no focused session; substitution skipped");
                    self.detector.discard_substitution(code);
                }
            },
        }

        Ok(outcome)
    }

    /// Handles a local key-up.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink rejects the release.
    pub fn handle_key_up(
        &mut self,
        sink: Option<&dyn KeyEventSink>,
        code: Keysym,
    ) -> Result<KeyUpOutcome, SinkError> {
        let outcome = self.detector.on_key_up(code, self.menu.is_shown());

        match &outcome {
            KeyUpOutcome::Forward(code) => send(sink, KeyEvent::release(*code))?,
            KeyUpOutcome::Suppress => {}
            KeyUpOutcome::Substitute { sent } => send(sink, KeyEvent::release(*sent))?,
        }

        Ok(outcome)
    }

    /// Handles a drag callback.  Always returns `false` (never consumed).
    pub fn handle_drag(&mut self, drag: &DragGesture) -> bool {
        let (consumed, transition) = self.gestures.on_drag(&mut self.menu, drag);
        if let Some(transition) = transition {
            self.publish(transition);
        }
        consumed
    }

    pub fn show_menu(&mut self) -> Option<MenuTransition> {
        let transition = self.menu.show();
        if let Some(t) = transition {
            self.publish(t);
        }
        transition
    }

    pub fn hide_menu(&mut self) -> Option<MenuTransition> {
        let transition = self.menu.hide();
        if let Some(t) = transition {
            self.publish(t);
        }
        transition
    }

    pub fn toggle_menu(&mut self) -> MenuTransition {
        let transition = self.menu.toggle();
        self.publish(transition);
        transition
    }

    pub fn is_menu_shown(&self) -> bool {
        self.menu.is_shown()
    }

    pub fn menu_scroll(&self) -> ScrollOffset {
        self.menu.scroll()
    }

    /// Returns a receiver that observes every menu visibility change.
    pub fn subscribe_menu(&self) -> watch::Receiver<bool> {
        self.menu_tx.subscribe()
    }

    /// Forgets the focused session: releases keys still substituted on the
    /// remote side, clears press state and hides the menu.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if a release cannot be sent.
    pub fn reset(&mut self, sink: Option<&dyn KeyEventSink>) -> Result<(), SinkError> {
        let pending = self.detector.reset();
        self.hide_menu();
        for code in pending {
            debug!(%code, "releasing substituted key on reset");
            send(sink, KeyEvent::release(code))?;
        }
        Ok(())
    }

    fn publish(&self, transition: MenuTransition) {
        info!(?transition, "menu visibility changed");
        self.menu_tx.send_replace(matches!(transition, MenuTransition::Shown));
    }
}

impl Default for InputSynthesizer {
    fn default() -> Self {
        Self::new(ChordKeys::default(), GestureThresholds::default())
    }
}

fn send(sink: Option<&dyn KeyEventSink>, event: KeyEvent) -> Result<(), SinkError> {
    match sink {
        Some(sink) => sink.send(event),
        None => {
            debug!(%event, "no focused session; event dropped");
            Ok(())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::key_sink::mock::RecordingKeySink;

    fn ctrl_alt_end(synth: &mut InputSynthesizer, sink: Option<&dyn KeyEventSink>) {
        synth.handle_key_down(sink, Keysym::CONTROL_L).unwrap();
        synth.handle_key_down(sink, Keysym::ALT_L).unwrap();
        synth.handle_key_down(sink, Keysym::END).unwrap();
    }

    #[test]
    fn test_plain_keys_are_forwarded() {
        // Arrange
        let sink = RecordingKeySink::new();
        let mut synth = InputSynthesizer::default();

        // Act
        synth.handle_key_down(Some(&sink), Keysym(0x61)).unwrap();
        synth.handle_key_up(Some(&sink), Keysym(0x61)).unwrap();

        // Assert
        assert_eq!(sink.events(), KeyEvent::stroke(Keysym(0x61)).to_vec());
    }

    #[test]
    fn test_delete_chord_sends_delete_pair() {
        let sink = RecordingKeySink::new();
        let mut synth = InputSynthesizer::default();

        ctrl_alt_end(&mut synth, Some(&sink));
        synth.handle_key_up(Some(&sink), Keysym::END).unwrap();

        assert_eq!(
            sink.events(),
            vec![
                KeyEvent::press(Keysym::CONTROL_L),
                KeyEvent::press(Keysym::ALT_L),
                KeyEvent::press(Keysym::DELETE),
                KeyEvent::release(Keysym::DELETE),
            ]
        );
    }

    #[test]
    fn test_menu_chord_toggles_menu_and_notifies_subscribers() {
        // Arrange
        let sink = RecordingKeySink::new();
        let mut synth = InputSynthesizer::default();
        let mut menu_rx = synth.subscribe_menu();

        // Act
        synth.handle_key_down(Some(&sink), Keysym::SHIFT_L).unwrap();
        synth.handle_key_down(Some(&sink), Keysym::CONTROL_L).unwrap();
        let outcome = synth.handle_key_down(Some(&sink), Keysym::ALT_L).unwrap();

        // Assert
        assert!(matches!(outcome, KeyDownOutcome::ToggleMenu { .. }));
        assert!(synth.is_menu_shown());
        assert!(menu_rx.has_changed().unwrap());
        assert!(*menu_rx.borrow_and_update());
        // Shift and Ctrl went out, so they are released; Alt never went out.
        assert_eq!(
            &sink.events()[2..],
            &[
                KeyEvent::release(Keysym::SHIFT_L),
                KeyEvent::release(Keysym::CONTROL_L),
            ]
        );
    }

    #[test]
    fn test_keys_are_not_sent_while_menu_is_shown() {
        let sink = RecordingKeySink::new();
        let mut synth = InputSynthesizer::default();
        synth.show_menu();

        synth.handle_key_down(Some(&sink), Keysym(0x61)).unwrap();
        synth.handle_key_up(Some(&sink), Keysym(0x61)).unwrap();

        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_state_is_tracked_without_a_session() {
        // Arrange – the menu chord fires with no focused session
        let mut synth = InputSynthesizer::default();
        for code in [Keysym::CONTROL_L, Keysym::ALT_L, Keysym::SHIFT_L] {
            synth.handle_key_down(None, code).unwrap();
        }
        let sink = RecordingKeySink::new();

        // Act – keys typed once a session is focused are held back by the menu
        synth.handle_key_down(Some(&sink), Keysym(0x61)).unwrap();

        // Assert
        assert!(synth.is_menu_shown());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_delete_chord_without_a_session_sends_no_orphan_release() {
        // Arrange – Ctrl+Alt+End with no focused session
        let mut synth = InputSynthesizer::default();
        ctrl_alt_end(&mut synth, None);
        let sink = RecordingKeySink::new();

        // Act – End released once a session is focused
        let outcome = synth.handle_key_up(Some(&sink), Keysym::END).unwrap();

        // Assert – no substitution was recorded, so Delete is never released
        assert_eq!(outcome, KeyUpOutcome::Forward(Keysym::END));
        assert!(!sink.events().contains(&KeyEvent::release(Keysym::DELETE)));
    }

    #[test]
    fn test_sink_failure_is_reported() {
        let sink = RecordingKeySink::failing();
        let mut synth = InputSynthesizer::default();

        let result = synth.handle_key_down(Some(&sink), Keysym(0x61));

        assert!(matches!(result, Err(SinkError::Transport(_))));
    }

    #[test]
    fn test_explicit_menu_commands_report_transitions() {
        let mut synth = InputSynthesizer::default();
        let menu_rx = synth.subscribe_menu();

        assert_eq!(synth.show_menu(), Some(MenuTransition::Shown));
        assert_eq!(synth.show_menu(), None);
        assert!(*menu_rx.borrow());
        assert_eq!(synth.toggle_menu(), MenuTransition::Hidden);
        assert_eq!(synth.hide_menu(), None);
        assert!(!*menu_rx.borrow());
    }

    #[test]
    fn test_drag_from_edge_shows_menu_but_is_not_consumed() {
        let mut synth = InputSynthesizer::default();
        let drag = DragGesture {
            in_progress: true,
            start_x: 30.0,
            start_y: 100.0,
            current_x: 100.0,
            current_y: 100.0,
            ..DragGesture::default()
        };

        assert!(!synth.handle_drag(&drag));
        assert!(synth.is_menu_shown());
    }

    #[test]
    fn test_reset_releases_substituted_keys_and_hides_menu() {
        // Arrange
        let sink = RecordingKeySink::new();
        let mut synth = InputSynthesizer::default();
        ctrl_alt_end(&mut synth, Some(&sink));
        synth.show_menu();
        sink.clear();

        // Act
        synth.reset(Some(&sink)).unwrap();

        // Assert
        assert_eq!(sink.events(), vec![KeyEvent::release(Keysym::DELETE)]);
        assert!(!synth.is_menu_shown());
        // A later End release has nothing left to substitute.
        synth.handle_key_up(Some(&sink), Keysym::END).unwrap();
        assert_eq!(sink.events().last(), Some(&KeyEvent::release(Keysym::END)));
    }
}
