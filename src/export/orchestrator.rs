//! Export orchestration
//!
//! One export runs `Start → Fetching → Formatting → Writing → Done`. Any stage
//! may fail; a failure stops the run immediately, so a fetch failure never
//! reaches the formatter and a format failure never touches the clipboard.
//! Runs share no mutable state: a single [`Exporter`] can serve concurrent
//! exports, and the last clipboard write wins.

use super::clipboard::{ClipboardError, ClipboardWriter, WriteMode};
use super::dialect::Dialect;
use super::formatter::{FormatError, Formatter};
use crate::config::Settings;
use crate::store::{BlockStore, StoreError};
use crate::tree::{FetchError, FetchedTree, TreeFetcher};
use log::{debug, error, info, warn};
use std::fmt;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Outcome Types
// ─────────────────────────────────────────────────────────────────────────────

/// Stages of a single export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Start,
    Fetching,
    Formatting,
    Writing,
    Done,
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportStage::Start => "starting",
            ExportStage::Fetching => "fetching",
            ExportStage::Formatting => "formatting",
            ExportStage::Writing => "writing to the clipboard",
            ExportStage::Done => "done",
        })
    }
}

/// Failure categories reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    StoreUnavailable,
    NotFound,
    Query,
    Timeout,
    Format,
    ClipboardUnavailable,
}

/// Why an export failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("fetching block '{uid}' timed out after {}ms", .timeout.as_millis())]
    Timeout { uid: String, timeout: Duration },

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl ExportError {
    /// The category of this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ExportError::Fetch(FetchError::StoreUnavailable) => FailureKind::StoreUnavailable,
            ExportError::Fetch(FetchError::NotFound(_)) => FailureKind::NotFound,
            ExportError::Fetch(FetchError::Query { .. }) => FailureKind::Query,
            ExportError::Timeout { .. } => FailureKind::Timeout,
            ExportError::Format(_) => FailureKind::Format,
            ExportError::Clipboard(_) => FailureKind::ClipboardUnavailable,
        }
    }

    /// The stage the export was in when it failed.
    pub fn stage(&self) -> ExportStage {
        match self {
            ExportError::Fetch(_) | ExportError::Timeout { .. } => ExportStage::Fetching,
            ExportError::Format(_) => ExportStage::Formatting,
            ExportError::Clipboard(_) => ExportStage::Writing,
        }
    }
}

/// Summary of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub dialect: Dialect,
    /// Blocks included in the export, root included
    pub node_count: usize,
    /// Child references that could not be resolved and were left out
    pub dropped_children: usize,
    pub write_mode: WriteMode,
}

// ─────────────────────────────────────────────────────────────────────────────
// Exporter
// ─────────────────────────────────────────────────────────────────────────────

/// Runs fetch, format and clipboard write for one block at a time.
pub struct Exporter {
    fetcher: TreeFetcher,
    clipboard: ClipboardWriter,
    fetch_timeout: Option<Duration>,
    html_clipboard: bool,
    formatters: fn(Dialect) -> &'static dyn Formatter,
}

impl Exporter {
    pub fn new(fetcher: TreeFetcher, clipboard: ClipboardWriter) -> Self {
        Self {
            fetcher,
            clipboard,
            fetch_timeout: None,
            html_clipboard: true,
            formatters: |dialect| dialect.formatter(),
        }
    }

    /// Build an exporter configured from user settings.
    pub fn from_settings(
        store: Option<Arc<dyn BlockStore>>,
        clipboard: ClipboardWriter,
        settings: &Settings,
    ) -> Self {
        let fetcher = TreeFetcher::from_optional(store).with_max_depth(settings.max_depth);
        Self::new(fetcher, clipboard)
            .with_fetch_timeout(settings.fetch_timeout())
            .with_html_clipboard(settings.html_clipboard)
    }

    /// Bound the time spent fetching. `None` waits indefinitely.
    pub fn with_fetch_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Whether to put HTML on the clipboard alongside the plain text.
    pub fn with_html_clipboard(mut self, enabled: bool) -> Self {
        self.html_clipboard = enabled;
        self
    }

    #[cfg(test)]
    fn with_formatters(mut self, formatters: fn(Dialect) -> &'static dyn Formatter) -> Self {
        self.formatters = formatters;
        self
    }

    /// Export block `uid` to the clipboard in `dialect`.
    pub fn export_node(&self, uid: &str, dialect: Dialect) -> Result<ExportReport, ExportError> {
        debug!("Export {} to {}: {}", uid, dialect, ExportStage::Start);

        match self.run(uid, dialect) {
            Ok(report) => {
                info!(
                    "Exported {} block(s) from {} to {} format",
                    report.node_count, uid, dialect
                );
                Ok(report)
            }
            Err(e) => {
                error!(
                    "Export of {} to {} failed while {}: {}",
                    uid,
                    dialect,
                    e.stage(),
                    e
                );
                Err(e)
            }
        }
    }

    fn run(&self, uid: &str, dialect: Dialect) -> Result<ExportReport, ExportError> {
        debug!("Export {}: {}", uid, ExportStage::Fetching);
        let fetched = self.fetch(uid)?;

        debug!("Export {}: {}", uid, ExportStage::Formatting);
        let export = (self.formatters)(dialect).export(&fetched.root)?;

        debug!("Export {}: {}", uid, ExportStage::Writing);
        let html = self.html_clipboard.then_some(export.html.as_str());
        let write_mode = self.clipboard.write(&export.plain_text, html)?;

        debug!("Export {}: {}", uid, ExportStage::Done);
        Ok(ExportReport {
            dialect,
            node_count: fetched.root.count(),
            dropped_children: fetched.dropped_children,
            write_mode,
        })
    }

    fn fetch(&self, uid: &str) -> Result<FetchedTree, ExportError> {
        let Some(timeout) = self.fetch_timeout else {
            return Ok(self.fetcher.fetch(uid)?);
        };

        let fetcher = self.fetcher.clone();
        let worker_uid = uid.to_string();
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("blockport-fetch".to_string())
            .spawn(move || {
                // The receiver is gone once the export has timed out.
                let _ = tx.send(fetcher.fetch(&worker_uid));
            });

        if let Err(e) = spawned {
            warn!("Could not start fetch worker, fetching without timeout: {}", e);
            return Ok(self.fetcher.fetch(uid)?);
        }

        match rx.recv_timeout(timeout) {
            Ok(result) => Ok(result?),
            Err(RecvTimeoutError::Timeout) => Err(ExportError::Timeout {
                uid: uid.to_string(),
                timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(ExportError::Fetch(FetchError::Query {
                uid: uid.to_string(),
                source: StoreError::Query("fetch worker stopped without a result".to_string()),
            })),
        }
    }
}

impl fmt::Debug for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter")
            .field("fetcher", &self.fetcher)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("html_clipboard", &self.html_clipboard)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
