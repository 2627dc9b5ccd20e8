//! Read-only access to the host's block graph
//!
//! The exporter never talks to a concrete graph database. Everything it needs
//! goes through [`BlockStore::pull`], a single query primitive modeled on the
//! outliner's pull API: a declarative field selector plus an
//! `[attribute, value]` lookup pair, answered with a nested JSON response or
//! nothing at all.

mod memory;

pub use memory::MemoryStore;

use serde_json::Value;
use thiserror::Error;

/// Selector requesting a block's text and, recursively, its children.
pub const PULL_SELECTOR: &str = "[:block/string {:block/children ...}]";

/// Lookup attribute used to address blocks by uid.
pub const UID_ATTRIBUTE: &str = ":block/uid";

/// Errors raised by a store while answering a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store rejected or failed to evaluate the query
    #[error("store query failed: {0}")]
    Query(String),
}

/// The narrow query interface the exporter consumes.
///
/// Implementations must be shareable across threads so an export can be
/// moved onto a worker when a fetch timeout is configured.
pub trait BlockStore: Send + Sync {
    /// Pull the entity identified by `lookup` using `selector`.
    ///
    /// Returns `Ok(None)` when no entity matches. The shape of a returned
    /// value is not trusted by callers.
    fn pull(&self, selector: &str, lookup: (&str, &str)) -> Result<Option<Value>, StoreError>;
}
