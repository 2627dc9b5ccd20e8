//! Defensive reading of raw pull responses.
//!
//! Hosts serialize the same block in several shapes: keys may or may not carry
//! the leading `:` of the attribute namespace, and a child can be referenced by
//! a bare uid, by a `[attribute, uid]` pair, by an object holding just the uid,
//! or embedded as a full payload. Every shape is classified here, once, so the
//! fetcher only deals with [`ChildRef`] tags.

use serde_json::{Map, Value};

/// Keys that may carry a block's text, in lookup order.
pub const CONTENT_KEYS: &[&str] = &[":block/string", "block/string", "string"];

/// Keys that may carry a block's child references, in lookup order.
pub const CHILDREN_KEYS: &[&str] = &[":block/children", "block/children", "children"];

/// Keys that may carry a block's uid, in lookup order.
pub const UID_KEYS: &[&str] = &[":block/uid", "block/uid", "uid", "id"];

/// A raw child reference, classified by shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChildRef<'a> {
    /// A bare uid string
    ScalarId(&'a str),
    /// A sequence whose second element is the uid, e.g. `[":block/uid", "abc"]`
    PairLike(&'a str),
    /// An object that carries only a uid under one of [`UID_KEYS`]
    KeyedId(&'a str),
    /// An object that already embeds the child's content and/or children
    FullPayload {
        uid: Option<&'a str>,
        fields: &'a Map<String, Value>,
    },
    /// Anything else; the child cannot be resolved
    Unrecognized,
}

impl<'a> ChildRef<'a> {
    /// Classify a raw child entry from a pull response.
    pub fn classify(entry: &'a Value) -> Self {
        match entry {
            Value::String(uid) => non_empty(uid).map_or(Self::Unrecognized, Self::ScalarId),
            Value::Array(items) => match items.get(1) {
                Some(Value::String(uid)) => {
                    non_empty(uid).map_or(Self::Unrecognized, Self::PairLike)
                }
                _ => Self::Unrecognized,
            },
            Value::Object(fields) => {
                let uid = uid_of(fields);
                if is_payload(fields) {
                    Self::FullPayload { uid, fields }
                } else {
                    uid.map_or(Self::Unrecognized, Self::KeyedId)
                }
            }
            _ => Self::Unrecognized,
        }
    }

    /// The uid this reference names, if any.
    pub fn uid(&self) -> Option<&'a str> {
        match *self {
            Self::ScalarId(uid) | Self::PairLike(uid) | Self::KeyedId(uid) => Some(uid),
            Self::FullPayload { uid, .. } => uid,
            Self::Unrecognized => None,
        }
    }
}

/// The block text, if present under a recognized key with a string value.
pub fn content_of(fields: &Map<String, Value>) -> Option<&str> {
    CONTENT_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
}

/// The raw child entries, or an empty slice when absent or not an array.
pub fn children_of(fields: &Map<String, Value>) -> &[Value] {
    CHILDREN_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The block uid, if present under a recognized key with a non-empty string value.
pub fn uid_of(fields: &Map<String, Value>) -> Option<&str> {
    UID_KEYS
        .iter()
        .find_map(|key| fields.get(*key).and_then(Value::as_str))
        .and_then(non_empty)
}

fn is_payload(fields: &Map<String, Value>) -> bool {
    content_of(fields).is_some()
        || CHILDREN_KEYS
            .iter()
            .any(|key| fields.get(*key).is_some_and(Value::is_array))
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
