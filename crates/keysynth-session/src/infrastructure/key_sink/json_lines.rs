//! Key sink that writes one JSON object per event to a writer.
//!
//! Used by the `keysynth` CLI in place of a real remote transport.  Each line
//! looks like:
//!
//! ```json
//! {"session":"5f0c…","pressed":true,"keysym":65507,"name":"Control_L"}
//! ```

use std::io::Write;
use std::sync::Mutex;

use keysynth_core::Keysym;
use serde::Serialize;
use uuid::Uuid;

use crate::application::synthesize_input::{KeyEventSink, SinkError};

#[derive(Debug, Serialize)]
struct KeyEventLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<Uuid>,
    pressed: bool,
    keysym: Keysym,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

/// Writes key events as JSON lines, flushing after every event.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
    session: Option<Uuid>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            session: None,
        }
    }

    /// Tags every line with `session`.
    pub fn with_session(mut self, session: Uuid) -> Self {
        self.session = Some(session);
        self
    }

    /// Returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Closed`] if a writer panicked while holding the
    /// lock.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer.into_inner().map_err(|_| SinkError::Closed)
    }
}

impl<W: Write + Send> KeyEventSink for JsonLinesSink<W> {
    fn send_key_event(&self, pressed: bool, code: Keysym) -> Result<(), SinkError> {
        let line = KeyEventLine {
            session: self.session,
            pressed,
            keysym: code,
            name: code.name(),
        };

        let mut writer = self.writer.lock().map_err(|_| SinkError::Closed)?;
        serde_json::to_writer(&mut *writer, &line)
            .map_err(|e| SinkError::Transport(e.to_string()))?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .map_err(|e| SinkError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(sink: JsonLinesSink<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = sink.into_inner().unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_each_event_becomes_one_line() {
        // Arrange
        let sink = JsonLinesSink::new(Vec::new());

        // Act
        sink.send_key_event(true, Keysym::CONTROL_L).unwrap();
        sink.send_key_event(false, Keysym(0x61)).unwrap();

        // Assert
        let lines = lines(sink);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["pressed"], true);
        assert_eq!(lines[0]["keysym"], 0xFFE3);
        assert_eq!(lines[0]["name"], "Control_L");
        assert_eq!(lines[1]["pressed"], false);
        assert!(lines[1].get("name").is_none());
        assert!(lines[1].get("session").is_none());
    }

    #[test]
    fn test_session_tag_is_written() {
        let id = Uuid::new_v4();
        let sink = JsonLinesSink::new(Vec::new()).with_session(id);

        sink.send_key_event(true, Keysym::RETURN).unwrap();

        assert_eq!(lines(sink)[0]["session"], id.to_string());
    }

    #[test]
    fn test_writer_failure_maps_to_transport_error() {
        struct BrokenWriter;
        impl Write for BrokenWriter {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let sink = JsonLinesSink::new(BrokenWriter);

        assert!(matches!(
            sink.send_key_event(true, Keysym::RETURN),
            Err(SinkError::Transport(_))
        ));
    }
}
