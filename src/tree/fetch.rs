//! Recursive block retrieval and normalization.
//!
//! The fetcher pulls the root block, then walks its child references
//! depth-first. Embedded payloads are normalized in place; references are
//! resolved with follow-up pulls, one at a time, so children keep store order.
//! A child that cannot be resolved is dropped and counted, never replaced by a
//! placeholder. Recursion stops at uids already on the current ancestor path
//! and below `max_depth`.

use super::node::Node;
use super::raw::{self, ChildRef};
use crate::store::{BlockStore, StoreError, PULL_SELECTOR, UID_ATTRIBUTE};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Default bound on tree depth below the root.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Errors that abort a fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No store is attached to this environment
    #[error("block store is not available in this environment")]
    StoreUnavailable,

    /// The root uid does not resolve to any block
    #[error("block '{0}' not found")]
    NotFound(String),

    /// The root query itself failed
    #[error("query for block '{uid}' failed: {source}")]
    Query {
        uid: String,
        #[source]
        source: StoreError,
    },
}

/// The result of a successful fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedTree {
    /// The normalized root block
    pub root: Node,
    /// Child references that were dropped because they could not be resolved
    pub dropped_children: usize,
}

/// Pulls a block and its descendants from a [`BlockStore`].
#[derive(Clone)]
pub struct TreeFetcher {
    store: Option<Arc<dyn BlockStore>>,
    max_depth: usize,
}

impl std::fmt::Debug for TreeFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeFetcher")
            .field("store_attached", &self.store.is_some())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl TreeFetcher {
    /// Create a fetcher reading from `store`.
    pub fn new(store: Arc<dyn BlockStore>) -> Self {
        Self::from_optional(Some(store))
    }

    /// Create a fetcher for an environment that may lack a store.
    pub fn from_optional(store: Option<Arc<dyn BlockStore>>) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the depth bound. Blocks at this depth keep their text but lose their children.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Fetch `uid` and its descendants.
    pub fn fetch(&self, uid: &str) -> Result<FetchedTree, FetchError> {
        let store = self.store.as_deref().ok_or(FetchError::StoreUnavailable)?;

        debug!("Pulling root block {}", uid);
        let response = pull_block(store, uid)
            .map_err(|source| FetchError::Query {
                uid: uid.to_string(),
                source,
            })?
            .ok_or_else(|| FetchError::NotFound(uid.to_string()))?;

        let mut walk = Walk {
            store: Some(store),
            max_depth: self.max_depth,
            path: vec![uid.to_string()],
            dropped: 0,
        };
        let root = walk.normalize(&response, 0);

        if walk.dropped > 0 {
            warn!(
                "Block {}: {} child reference(s) could not be resolved and were omitted",
                uid, walk.dropped
            );
        }
        debug!("Fetched {} block(s) under {}", root.count(), uid);

        Ok(FetchedTree {
            root,
            dropped_children: walk.dropped,
        })
    }
}

/// Normalize a pull response without a store.
///
/// Embedded payloads are kept; uid references cannot be resolved and are
/// dropped. Normalizing [`Node::to_pull_response`] yields the original tree.
pub fn normalize_response(response: &Value) -> Node {
    let mut walk = Walk {
        store: None,
        max_depth: DEFAULT_MAX_DEPTH,
        path: Vec::new(),
        dropped: 0,
    };
    walk.normalize(response, 0)
}

fn pull_block(store: &dyn BlockStore, uid: &str) -> Result<Option<Value>, StoreError> {
    Ok(store
        .pull(PULL_SELECTOR, (UID_ATTRIBUTE, uid))?
        .filter(|response| !response.is_null()))
}

/// State of one depth-first traversal.
struct Walk<'s> {
    store: Option<&'s dyn BlockStore>,
    max_depth: usize,
    /// Uids of the blocks between the root and the current block
    path: Vec<String>,
    dropped: usize,
}

impl Walk<'_> {
    fn normalize(&mut self, response: &Value, depth: usize) -> Node {
        match response.as_object() {
            Some(fields) => self.normalize_fields(fields, depth),
            None => Node::default(),
        }
    }

    fn normalize_fields(&mut self, fields: &Map<String, Value>, depth: usize) -> Node {
        let content = raw::content_of(fields).unwrap_or_default().to_string();
        let entries = raw::children_of(fields);

        if depth >= self.max_depth && !entries.is_empty() {
            warn!(
                "Depth limit {} reached; omitting {} child reference(s)",
                self.max_depth,
                entries.len()
            );
            self.dropped += entries.len();
            return Node::new(content);
        }

        let mut children = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.resolve(entry, depth + 1) {
                Some(child) => children.push(child),
                None => self.dropped += 1,
            }
        }

        Node { content, children }
    }

    fn resolve(&mut self, entry: &Value, depth: usize) -> Option<Node> {
        match ChildRef::classify(entry) {
            ChildRef::FullPayload { uid: Some(uid), fields } => {
                if self.on_path(uid) {
                    return None;
                }
                self.path.push(uid.to_string());
                let node = self.normalize_fields(fields, depth);
                self.path.pop();
                Some(node)
            }
            ChildRef::FullPayload { uid: None, fields } => Some(self.normalize_fields(fields, depth)),
            ChildRef::ScalarId(uid) | ChildRef::PairLike(uid) | ChildRef::KeyedId(uid) => {
                self.resolve_uid(uid, depth)
            }
            ChildRef::Unrecognized => {
                warn!("Omitting unrecognized child reference: {}", entry);
                None
            }
        }
    }

    fn resolve_uid(&mut self, uid: &str, depth: usize) -> Option<Node> {
        if self.on_path(uid) {
            return None;
        }
        let Some(store) = self.store else {
            debug!("No store to resolve child {}", uid);
            return None;
        };

        let response = match pull_block(store, uid) {
            Ok(Some(response)) => response,
            Ok(None) => {
                warn!("Omitting child {}: not found", uid);
                return None;
            }
            Err(e) => {
                warn!("Omitting child {}: {}", uid, e);
                return None;
            }
        };

        let Some(fields) = response.as_object() else {
            warn!("Omitting child {}: response is not a block", uid);
            return None;
        };

        self.path.push(uid.to_string());
        let node = self.normalize_fields(fields, depth);
        self.path.pop();
        Some(node)
    }

    fn on_path(&self, uid: &str) -> bool {
        let cyclic = self.path.iter().any(|ancestor| ancestor == uid);
        if cyclic {
            warn!("Omitting child {}: cyclic reference to an ancestor", uid);
        }
        cyclic
    }
}
