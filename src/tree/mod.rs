//! Outline tree model and retrieval
//!
//! - `node.rs` - the normalized [`Node`] tree
//! - `raw.rs` - classification of raw pull responses and child references
//! - `fetch.rs` - the recursive [`TreeFetcher`]

mod fetch;
mod node;
pub mod raw;

pub use fetch::{normalize_response, FetchError, FetchedTree, TreeFetcher, DEFAULT_MAX_DEPTH};
pub use node::Node;
pub use raw::ChildRef;
