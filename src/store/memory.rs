//! In-memory block store backed by a JSON snapshot.
//!
//! A snapshot is a JSON object mapping block uids to pull responses:
//!
//! ```json
//! {
//!   "root-uid": { ":block/string": "Hello", ":block/children": ["child-uid"] },
//!   "child-uid": { ":block/string": "World" }
//! }
//! ```

use super::{BlockStore, StoreError, UID_ATTRIBUTE};
use crate::error::{Error, Result};
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A [`BlockStore`] that answers uid lookups from a map of pull responses.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blocks: HashMap<String, Value>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the pull response returned for `uid`.
    pub fn insert(&mut self, uid: impl Into<String>, response: Value) {
        self.blocks.insert(uid.into(), response);
    }

    /// Builder-style variant of [`MemoryStore::insert`].
    pub fn with_block(mut self, uid: impl Into<String>, response: Value) -> Self {
        self.insert(uid, response);
        self
    }

    /// Number of blocks in the store.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the store holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Load a snapshot file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&contents).map_err(|e| Error::Snapshot {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let Value::Object(map) = value else {
            return Err(Error::Snapshot {
                path: path.to_path_buf(),
                message: "expected a JSON object keyed by block uid".to_string(),
            });
        };

        debug!("Loaded {} blocks from {}", map.len(), path.display());
        Ok(Self {
            blocks: map.into_iter().collect(),
        })
    }
}

impl BlockStore for MemoryStore {
    fn pull(
        &self,
        _selector: &str,
        lookup: (&str, &str),
    ) -> std::result::Result<Option<Value>, StoreError> {
        let (attribute, value) = lookup;
        if attribute != UID_ATTRIBUTE {
            return Err(StoreError::Query(format!(
                "unsupported lookup attribute {}",
                attribute
            )));
        }

        Ok(self
            .blocks
            .get(value)
            .filter(|response| !response.is_null())
            .cloned())
    }
}
