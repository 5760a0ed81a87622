//! Key event sink adapters.
//!
//! - **`json_lines`** – writes each event as a JSON object on its own line; the
//!   CLI points it at stdout.
//! - **`mock`** – records events in memory with arrival instants, for tests.

pub mod json_lines;
pub mod mock;
