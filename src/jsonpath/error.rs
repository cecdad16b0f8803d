//! Error types for JSONPath parsing and evaluation.

use std::fmt;

/// Errors that can occur during JSONPath parsing or evaluation.
///
/// These never cross the query service boundary: the service folds them into
/// a failed [`super::QueryResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonPathError {
    /// The query string is empty or only whitespace.
    EmptyQuery,
    /// A bracket opened in a simple path is never closed.
    UnclosedBracket { segment: String },
}

impl fmt::Display for JsonPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonPathError::EmptyQuery => write!(f, "JSONPath query cannot be null or empty"),
            JsonPathError::UnclosedBracket { segment } => {
                write!(f, "Missing closing ']' in path segment '{}'", segment)
            }
        }
    }
}

impl std::error::Error for JsonPathError {}
