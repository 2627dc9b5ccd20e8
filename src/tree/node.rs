//! The normalized outline tree.

use super::raw::{CHILDREN_KEYS, CONTENT_KEYS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A text-bearing block with ordered children.
///
/// Uids are only query keys during a fetch; they are not kept on the
/// normalized tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// The block's own text (empty when the store had none)
    pub content: String,
    /// Child blocks in store order
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node without children.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style constructor attaching children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Height of the subtree: 0 for a leaf, 1 when only direct children exist.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Visit every node depth-first in document order with its depth (root = 0).
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        self.walk_at(0, visit);
    }

    fn walk_at<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&Node, usize),
    {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Render this tree back into the store's pull-response shape, with every
    /// child embedded as a full payload.
    pub fn to_pull_response(&self) -> Value {
        let children: Vec<Value> = self.children.iter().map(Node::to_pull_response).collect();
        json!({
            CONTENT_KEYS[0]: self.content,
            CHILDREN_KEYS[0]: children,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::new("root").with_children(vec![
            Node::new("a").with_children(vec![Node::new("a1")]),
            Node::new("b"),
        ])
    }

    #[test]
    fn test_count_and_depth() {
        let tree = sample();
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.depth(), 2);
        assert_eq!(Node::new("leaf").depth(), 0);
    }

    #[test]
    fn test_walk_order() {
        let mut seen = Vec::new();
        sample().walk(&mut |node: &Node, depth: usize| seen.push((node.content.clone(), depth)));
        assert_eq!(
            seen,
            vec![
                ("root".to_string(), 0),
                ("a".to_string(), 1),
                ("a1".to_string(), 2),
                ("b".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_to_pull_response_shape() {
        let value = Node::new("x").with_children(vec![Node::new("y")]).to_pull_response();
        assert_eq!(value[":block/string"], "x");
        assert_eq!(value[":block/children"][0][":block/string"], "y");
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let node: Node = serde_json::from_str("{}").unwrap();
        assert_eq!(node, Node::default());
    }
}
