//! Shared, read-only JSON document trees.
//!
//! A `JsonTree` owns a parsed document behind an `Arc`, so one parse can serve
//! any number of queries, including queries running on other threads. Nothing
//! in the crate mutates a tree after it has been built.
//!
//! # Example
//!
//! ```
//! use jsonextractor::document::tree::JsonTree;
//! use jsonextractor::document::node::JsonValue;
//! use indexmap::IndexMap;
//!
//! let mut fields = IndexMap::new();
//! fields.insert("name".to_string(), JsonValue::from("Alice"));
//! let tree = JsonTree::new(JsonValue::Object(fields));
//!
//! assert!(tree.root().is_object());
//! assert_eq!(tree.node_count(), 2);
//! ```

use super::node::JsonValue;
use std::sync::Arc;

/// A complete JSON document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonTree {
    root: Arc<JsonValue>,
}

impl JsonTree {
    /// Creates a new tree with the given root value.
    pub fn new(root: JsonValue) -> Self {
        Self {
            root: Arc::new(root),
        }
    }

    /// Returns a reference to the root value of the tree.
    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    /// Returns a new handle to the shared root, for handing to other threads.
    pub fn shared_root(&self) -> Arc<JsonValue> {
        Arc::clone(&self.root)
    }

    /// Counts every value in the tree, the root included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }

    /// Returns the nesting depth of the tree. A scalar root has depth 0,
    /// `[1]` has depth 1.
    pub fn max_depth(&self) -> usize {
        depth_of(self.root())
    }
}

/// Computes the container nesting depth of a value without recursing.
pub(crate) fn depth_of(value: &JsonValue) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(value, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        if node.is_container() {
            deepest = deepest.max(depth + 1);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn nested() -> JsonTree {
        let mut inner = IndexMap::new();
        inner.insert(
            "items".to_string(),
            JsonValue::Array(vec![JsonValue::from(1), JsonValue::from(2)]),
        );
        let mut outer = IndexMap::new();
        outer.insert("inner".to_string(), JsonValue::Object(inner));
        outer.insert("flag".to_string(), JsonValue::from(true));
        JsonTree::new(JsonValue::Object(outer))
    }

    #[test]
    fn test_node_count() {
        // root, inner, items, 1, 2, flag
        assert_eq!(nested().node_count(), 6);
    }

    #[test]
    fn test_max_depth() {
        assert_eq!(nested().max_depth(), 3);
        assert_eq!(JsonTree::new(JsonValue::Null).max_depth(), 0);
    }

    #[test]
    fn test_shared_root_points_at_same_value() {
        let tree = nested();
        let shared = tree.shared_root();
        assert!(std::ptr::eq(shared.as_ref(), tree.root()));
    }
}
