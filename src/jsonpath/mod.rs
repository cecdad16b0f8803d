//! JSONPath query engine over a parsed JSON tree.
//!
//! Queries are dispatched to one of two engines. Paths that use recursive
//! descent, filters, slices, index lists, functions or more than one bracket
//! are parsed into [`PathSegment`]s and run by the [`Evaluator`]; plain
//! dot/bracket paths go through the [`simple`] walker.
//!
//! # Supported Syntax
//!
//! - `$` - Root node
//! - `.name` or `name` - Property access
//! - `..` - The node and all its descendants
//! - `..name` - Property at any depth
//! - `*` - Direct children
//! - `[*]` - All array elements
//! - `[n]` - Array index
//! - `[a:b]` - Array slice, both bounds optional
//! - `[i,j,k]` - Index list, in the order given
//! - `[?(@.prop OP literal)]` - Filter, OP one of `== = != > >= < <=`
//! - `length()`, `keys()`, `values()` - Functions
//!
//! # Examples
//!
//! ```
//! // $.store.book[?(@.price < 10)] - cheap books
//! // $..price - all price fields anywhere
//! // $.store.book[0,2] - first and third book
//! // $.store.book.length() - number of books
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod parser;
pub mod result;
pub mod search;
pub mod service;
pub mod simple;

pub use ast::{FilterExpression, FilterOperator, JsonPath, PathFunction, PathSegment};
pub use error::JsonPathError;
pub use evaluator::Evaluator;
pub use parser::Parser;
pub use result::QueryResult;
pub use search::SearchValue;
pub use service::{execute_json_path, is_advanced_query, QueryService};
