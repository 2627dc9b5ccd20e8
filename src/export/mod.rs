//! Block Export Module for blockport
//!
//! This module turns a fetched block tree into dialect text and places it on
//! the clipboard.
//!
//! # Supported Dialects
//!
//! - **Slack**: mrkdwn emphasis, `•` bullets
//! - **WhatsApp**: WhatsApp emphasis, `-` items
//! - **Google Docs**: Markdown list, pasted as a native bulleted list
//! - **RichText**: Markdown with a heading, for email and word processors
//!
//! # Architecture
//!
//! - `dialect.rs` - The closed set of dialects and their formatters
//! - `formatter.rs` - The `Formatter` capability and shared outline layout
//! - `markup.rs` - Inline markup conversion
//! - `dialects/` - One formatter per dialect
//! - `html.rs` - Markdown to HTML for the rich clipboard payload
//! - `clipboard.rs` - Platform clipboard operations
//! - `orchestrator.rs` - Fetch → format → write for one block

pub mod clipboard;
mod dialect;
pub mod dialects;
mod formatter;
pub mod html;
pub mod markup;
mod orchestrator;

pub use clipboard::{ClipboardBackend, ClipboardError, ClipboardWriter, SystemClipboard, WriteMode};
pub use dialect::{Dialect, UnknownDialect};
pub use formatter::{FormatError, FormattedExport, Formatter};
pub use html::markdown_to_html;
pub use orchestrator::{ExportError, ExportReport, ExportStage, Exporter, FailureKind};
