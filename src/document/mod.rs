//! JSON document model.
//!
//! # Modules
//!
//! - `node`: the `JsonValue` tagged union
//! - `tree`: `JsonTree`, a shared read-only document
//! - `parser`: text to tree, with depth limits
//! - `serializer`: tree to text (pretty or compact)

pub mod node;
pub mod parser;
pub mod serializer;
pub mod tree;
