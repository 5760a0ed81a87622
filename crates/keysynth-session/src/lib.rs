//! keysynth-session library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does keysynth-session do? (for beginners)
//!
//! `keysynth-core` decides *what* a remote session should receive; this crate
//! *delivers* it:
//!
//! 1. A [`RemoteSession`](application::session::RemoteSession) pairs a
//!    [`KeyEventSink`](application::synthesize_input::KeyEventSink) (the
//!    transport towards the remote desktop) with a batch dispatcher.
//! 2. Local key and drag events go through the
//!    [`InputSynthesizer`](application::synthesize_input::InputSynthesizer),
//!    which forwards, suppresses or substitutes them and toggles the menu.
//! 3. Clipboard pastes are encoded by `keysynth-core` and typed into the
//!    session in rate-limited batches by the dispatcher's Tokio task.

/// Application layer: use cases and the traits they depend on.
pub mod application;

/// Infrastructure layer: sinks, clipboard and configuration adapters.
pub mod infrastructure;
