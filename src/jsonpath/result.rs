use crate::document::node::JsonValue;
use std::time::Duration;

/// Outcome of one query or search call.
///
/// A failed result carries no values and an error message; a successful
/// result may still be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    success: bool,
    results: Vec<JsonValue>,
    query: String,
    error_message: Option<String>,
    elapsed: Duration,
}

impl QueryResult {
    pub fn success(results: Vec<JsonValue>, query: impl Into<String>, elapsed: Duration) -> Self {
        QueryResult {
            success: true,
            results,
            query: query.into(),
            error_message: None,
            elapsed,
        }
    }

    pub fn failure(
        message: impl Into<String>,
        query: impl Into<String>,
        elapsed: Duration,
    ) -> Self {
        QueryResult {
            success: false,
            results: Vec::new(),
            query: query.into(),
            error_message: Some(message.into()),
            elapsed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn results(&self) -> &[JsonValue] {
        &self.results
    }

    pub fn into_results(self) -> Vec<JsonValue> {
        self.results
    }

    /// The only result, when there is exactly one.
    pub fn single_result(&self) -> Option<&JsonValue> {
        match self.results.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// The query text, or a descriptive label for search calls.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
