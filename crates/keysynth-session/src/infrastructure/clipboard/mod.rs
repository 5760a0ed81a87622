//! Clipboard adapters.
//!
//! The CLI has no OS clipboard to read, so [`ReaderClipboard`] treats a file
//! (or standard input) as the clipboard.  Bytes that are not valid UTF-8 are
//! reported as non-text content, the same way a desktop clipboard holding an
//! image would be.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::application::paste_clipboard::{ClipboardContent, ClipboardError, ClipboardProvider};

const BINARY_MIME_TYPE: &str = "application/octet-stream";

/// Where a [`ReaderClipboard`] reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardSource {
    File(PathBuf),
    Stdin,
}

/// Clipboard backed by a file or standard input.
#[derive(Debug, Clone)]
pub struct ReaderClipboard {
    source: ClipboardSource,
}

impl ReaderClipboard {
    pub fn new(source: ClipboardSource) -> Self {
        Self { source }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(ClipboardSource::File(path.into()))
    }

    pub fn stdin() -> Self {
        Self::new(ClipboardSource::Stdin)
    }

    pub fn source(&self) -> &ClipboardSource {
        &self.source
    }
}

#[async_trait]
impl ClipboardProvider for ReaderClipboard {
    async fn read_text(&self) -> Result<ClipboardContent, ClipboardError> {
        let bytes = match &self.source {
            ClipboardSource::File(path) => tokio::fs::read(path).await?,
            ClipboardSource::Stdin => {
                let mut buf = Vec::new();
                tokio::io::stdin().read_to_end(&mut buf).await?;
                buf
            }
        };

        Ok(match String::from_utf8(bytes) {
            Ok(text) => ClipboardContent::Text(text),
            Err(_) => ClipboardContent::NonText {
                mime_type: BINARY_MIME_TYPE.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_file(contents: &[u8]) -> PathBuf {
        let path = std::env::temp_dir().join(format!("keysynth_clip_{}", Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn test_utf8_file_reads_as_text() {
        // Arrange
        let path = temp_file("ls -la\n".as_bytes());
        let clipboard = ReaderClipboard::from_file(&path);

        // Act
        let content = clipboard.read_text().await.unwrap();

        // Assert
        assert_eq!(content, ClipboardContent::Text("ls -la\n".to_string()));
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_binary_file_reads_as_non_text() {
        let path = temp_file(&[0x89, b'P', b'N', b'G', 0xFF, 0xFE]);
        let clipboard = ReaderClipboard::from_file(&path);

        let content = clipboard.read_text().await.unwrap();

        assert!(matches!(content, ClipboardContent::NonText { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let clipboard = ReaderClipboard::from_file("/nonexistent/keysynth/clipboard.txt");

        let result = clipboard.read_text().await;

        assert!(matches!(result, Err(ClipboardError::Io(_))));
    }
}
