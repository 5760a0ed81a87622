//! Application layer use cases.
//!
//! # What use cases are there?
//!
//! - **`synthesize_input`** – Runs every local key-down/key-up and drag through
//!   the chord detector and gesture controller, and sends the resulting events
//!   to the focused session's [`KeyEventSink`](synthesize_input::KeyEventSink).
//!   Also owns the menu visibility state and its watch channel.
//!
//! - **`dispatch_keys`** – The per-session worker that sends paste jobs in
//!   rate-limited batches.
//!
//! - **`paste_clipboard`** – Reads the local clipboard through a
//!   `ClipboardProvider` and queues the encoded text on the focused session.
//!
//! - **`clear_screen`** – Queues Ctrl+L on the focused session.
//!
//! - **`session`** – `RemoteSession`, the handle tying a sink to its dispatcher.

pub mod clear_screen;
pub mod dispatch_keys;
pub mod paste_clipboard;
pub mod session;
pub mod synthesize_input;
