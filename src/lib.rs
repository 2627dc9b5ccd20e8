//! blockport - export outliner blocks to the clipboard
//!
//! Fetches a block and its descendants from a host block graph, renders the
//! subtree in a target dialect (Slack, WhatsApp, Google Docs or rich text) and
//! copies it to the system clipboard as HTML with a plain-text alternative.
//!
//! ```ignore
//! use blockport::{ClipboardWriter, Dialect, Exporter, MemoryStore, TreeFetcher};
//! use std::sync::Arc;
//!
//! let store = MemoryStore::load("graph.json".as_ref())?;
//! let exporter = Exporter::new(TreeFetcher::new(Arc::new(store)), ClipboardWriter::system());
//! let report = exporter.export_node("abc123", Dialect::Slack)?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod tree;

pub use config::{load_config, Settings};
pub use export::{
    ClipboardWriter, Dialect, ExportError, ExportReport, Exporter, FailureKind, FormattedExport,
    Formatter,
};
pub use store::{BlockStore, MemoryStore};
pub use tree::{Node, TreeFetcher};
