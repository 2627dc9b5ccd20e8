//! Clipboard Operations for Export
//!
//! This module places an export on the system clipboard. The primary path
//! writes HTML together with a plain-text alternative so rich-text targets
//! paste the formatting and plain targets paste the text. When that write is
//! not supported, a plain-text-only write is attempted. Each call makes one
//! attempt per path; retrying is left to the caller.

use arboard::Clipboard;
use log::{debug, warn};
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Failure of a single clipboard operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Failed to access clipboard
    #[error("Clipboard access error: {0}")]
    Access(String),
    /// Failed to set clipboard content
    #[error("Clipboard write error: {0}")]
    Write(String),
}

/// Neither the dual-representation nor the plain-text write succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {text}{}", describe_html_failure(.html))]
    Unavailable {
        /// Why the HTML write failed, if it was attempted
        html: Option<BackendError>,
        /// Why the plain-text write failed
        text: BackendError,
    },
}

fn describe_html_failure(html: &Option<BackendError>) -> String {
    html.as_ref()
        .map(|e| format!(" (HTML write: {})", e))
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Backends
// ─────────────────────────────────────────────────────────────────────────────

/// Access to a clipboard that accepts HTML and plain text.
pub trait ClipboardBackend: Send + Sync {
    /// Place `html` on the clipboard with `alt_text` as its plain-text alternative.
    fn set_html(&self, html: &str, alt_text: &str) -> Result<(), BackendError>;

    /// Place plain text on the clipboard.
    fn set_text(&self, text: &str) -> Result<(), BackendError>;
}

/// The system clipboard, through arboard.
///
/// A fresh handle is opened per write, so a missing display or clipboard
/// service surfaces as [`BackendError::Access`] on each attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn open() -> Result<Clipboard, BackendError> {
        Clipboard::new().map_err(|e| BackendError::Access(e.to_string()))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_html(&self, html: &str, alt_text: &str) -> Result<(), BackendError> {
        Self::open()?
            .set_html(html, Some(alt_text))
            .map_err(|e| BackendError::Write(e.to_string()))
    }

    fn set_text(&self, text: &str) -> Result<(), BackendError> {
        Self::open()?
            .set_text(text)
            .map_err(|e| BackendError::Write(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Writer
// ─────────────────────────────────────────────────────────────────────────────

/// Which representation ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// HTML with a plain-text alternative
    Html,
    /// Plain text only
    PlainText,
}

/// Writes plain-text/HTML pairs with a plain-text fallback.
pub struct ClipboardWriter {
    backend: Box<dyn ClipboardBackend>,
}

impl ClipboardWriter {
    pub fn new(backend: Box<dyn ClipboardBackend>) -> Self {
        Self { backend }
    }

    /// A writer for the system clipboard.
    pub fn system() -> Self {
        Self::new(Box::new(SystemClipboard))
    }

    /// Write `plain_text`, and `html` when given, to the clipboard.
    pub fn write(&self, plain_text: &str, html: Option<&str>) -> Result<WriteMode, ClipboardError> {
        let html_error = match html {
            Some(html) => match self.backend.set_html(html, plain_text) {
                Ok(()) => {
                    debug!("Copied {} bytes of HTML with plain-text alternative", html.len());
                    return Ok(WriteMode::Html);
                }
                Err(e) => {
                    warn!("HTML clipboard write failed, falling back to plain text: {}", e);
                    Some(e)
                }
            },
            None => None,
        };

        match self.backend.set_text(plain_text) {
            Ok(()) => {
                debug!("Copied {} bytes of plain text", plain_text.len());
                Ok(WriteMode::PlainText)
            }
            Err(text) => Err(ClipboardError::Unavailable {
                html: html_error,
                text,
            }),
        }
    }
}

impl std::fmt::Debug for ClipboardWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardWriter").finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records writes; each path can be made to fail.
    #[derive(Default)]
    struct FakeBackend {
        html_fails: bool,
        text_fails: bool,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl ClipboardBackend for FakeBackend {
        fn set_html(&self, html: &str, alt_text: &str) -> Result<(), BackendError> {
            self.calls.lock().unwrap().push(format!("html:{}|{}", html, alt_text));
            if self.html_fails {
                Err(BackendError::Write("html unsupported".to_string()))
            } else {
                Ok(())
            }
        }

        fn set_text(&self, text: &str) -> Result<(), BackendError> {
            self.calls.lock().unwrap().push(format!("text:{}", text));
            if self.text_fails {
                Err(BackendError::Access("no clipboard".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn writer(html_fails: bool, text_fails: bool) -> (ClipboardWriter, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = FakeBackend {
            html_fails,
            text_fails,
            calls: calls.clone(),
        };
        (ClipboardWriter::new(Box::new(backend)), calls)
    }

    #[test]
    fn test_html_path() {
        let (writer, calls) = writer(false, false);
        assert_eq!(writer.write("plain", Some("<p>rich</p>")), Ok(WriteMode::Html));
        assert_eq!(*calls.lock().unwrap(), vec!["html:<p>rich</p>|plain".to_string()]);
    }

    #[test]
    fn test_fallback_to_plain_text() {
        let (writer, calls) = writer(true, false);
        assert_eq!(writer.write("plain", Some("<p>rich</p>")), Ok(WriteMode::PlainText));
        assert_eq!(calls.lock().unwrap().len(), 2);
        assert_eq!(calls.lock().unwrap()[1], "text:plain");
    }

    #[test]
    fn test_plain_only_when_no_html() {
        let (writer, calls) = writer(false, false);
        assert_eq!(writer.write("plain", None), Ok(WriteMode::PlainText));
        assert_eq!(*calls.lock().unwrap(), vec!["text:plain".to_string()]);
    }

    #[test]
    fn test_both_paths_fail() {
        let (writer, _) = writer(true, true);
        let err = writer.write("plain", Some("<p>rich</p>")).unwrap_err();
        assert_eq!(
            err,
            ClipboardError::Unavailable {
                html: Some(BackendError::Write("html unsupported".to_string())),
                text: BackendError::Access("no clipboard".to_string()),
            }
        );
        let msg = err.to_string();
        assert!(msg.contains("no clipboard"));
        assert!(msg.contains("html unsupported"));
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Access("test".to_string());
        assert!(err.to_string().contains("test"));
    }

    // Note: SystemClipboard tests require a display/clipboard context
    // which isn't typically available in CI environments.
}
