//! Infrastructure layer: adapters behind the application traits.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keysynth_core`, but MUST NOT be imported by the application layer
//! (test modules aside).
//!
//! # Sub-modules
//!
//! - **`key_sink`** – `KeyEventSink` implementations: JSON lines for the CLI
//!   and an in-memory recorder for tests.
//! - **`clipboard`** – A `ClipboardProvider` reading a file or stdin.
//! - **`storage`** – TOML configuration file loading.

pub mod clipboard;
pub mod key_sink;
pub mod storage;
