//! Query façade: engine dispatch plus the search primitives.
//!
//! Every operation returns a [`QueryResult`]; engine faults are folded into
//! failed results and never propagate to the caller.

use super::error::JsonPathError;
use super::evaluator::Evaluator;
use super::parser::Parser;
use super::result::QueryResult;
use super::search::{self, SearchValue};
use super::simple::evaluate_simple;
use crate::document::node::JsonValue;
use std::borrow::Cow;
use std::time::Instant;

/// Runs queries and searches against one immutable document.
///
/// The service only borrows the tree, so several services (on several
/// threads) may share the same root.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    root: &'a JsonValue,
}

impl<'a> QueryService<'a> {
    pub fn new(root: &'a JsonValue) -> Self {
        QueryService { root }
    }

    pub fn root(&self) -> &'a JsonValue {
        self.root
    }

    /// Evaluates one JSONPath query, choosing the segment evaluator or the
    /// simple walker by the shape of the query.
    pub fn execute_json_path(&self, query: &str) -> QueryResult {
        let start = Instant::now();

        if query.trim().is_empty() {
            return QueryResult::failure(JsonPathError::EmptyQuery.to_string(), query, start.elapsed());
        }

        let outcome = if is_advanced_query(query) {
            Ok(self.run_advanced(query))
        } else {
            evaluate_simple(self.root, query)
                .map(|nodes| nodes.into_iter().cloned().collect())
                .map_err(|e| format!("JSONPath error: {}", e))
        };

        let elapsed = start.elapsed();
        match outcome {
            Ok(results) => {
                log::debug!(
                    "JSONPath query '{}' returned {} results in {:?}",
                    query,
                    results.len(),
                    elapsed
                );
                QueryResult::success(results, query, elapsed)
            }
            Err(message) => {
                log::debug!("JSONPath query '{}' failed: {}", query, message);
                QueryResult::failure(message, query, elapsed)
            }
        }
    }

    fn run_advanced(&self, query: &str) -> Vec<JsonValue> {
        let path = Parser::parse(query);
        Evaluator::new(self.root)
            .evaluate(&path)
            .into_iter()
            .map(Cow::into_owned)
            .collect()
    }

    /// Runs each query in order and concatenates the successful results.
    /// A failing query is logged and skipped.
    pub fn execute_multiple_queries<S: AsRef<str>>(&self, queries: &[S]) -> QueryResult {
        let start = Instant::now();
        let mut all = Vec::new();

        for query in queries {
            let query: &str = query.as_ref();
            let result = self.execute_json_path(query);
            if result.is_success() {
                all.extend(result.into_results());
            } else {
                log::warn!(
                    "Query '{}' failed: {}",
                    query,
                    result.error_message().unwrap_or_default()
                );
            }
        }

        let label = queries
            .iter()
            .map(|q| q.as_ref())
            .collect::<Vec<&str>>()
            .join(" | ");
        QueryResult::success(all, label, start.elapsed())
    }

    pub fn find_by_key(&self, key: &str, case_sensitive: bool) -> QueryResult {
        let start = Instant::now();
        let results = search::find_by_key(self.root, key, case_sensitive)
            .into_iter()
            .cloned()
            .collect();
        let label = format!("find_by_key('{}', case_sensitive: {})", key, case_sensitive);
        QueryResult::success(results, label, start.elapsed())
    }

    pub fn find_by_value(&self, value: &SearchValue, case_sensitive: bool) -> QueryResult {
        let start = Instant::now();
        let results = search::find_by_value(self.root, value, case_sensitive)
            .into_iter()
            .cloned()
            .collect();
        let label = format!("find_by_value('{}', case_sensitive: {})", value, case_sensitive);
        QueryResult::success(results, label, start.elapsed())
    }

    /// Resolves `path` to an array and returns its elements, skipping then
    /// taking as requested.
    pub fn get_array_elements(
        &self,
        path: &str,
        skip: Option<usize>,
        take: Option<usize>,
    ) -> QueryResult {
        let start = Instant::now();
        let resolved = self.execute_json_path(path);

        let Some(first) = resolved.results().first().filter(|_| resolved.is_success()) else {
            return QueryResult::failure(
                format!("Array not found at path: {}", path),
                path,
                start.elapsed(),
            );
        };
        let Some(items) = first.as_array() else {
            return QueryResult::failure(
                format!("Element at path '{}' is not an array", path),
                path,
                start.elapsed(),
            );
        };

        let results = items
            .iter()
            .skip(skip.unwrap_or(0))
            .take(take.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        let label = format!(
            "get_array_elements('{}', skip: {}, take: {})",
            path,
            fmt_option(skip),
            fmt_option(take)
        );
        QueryResult::success(results, label, start.elapsed())
    }

    /// Elements of the array at `path` for which `predicate` holds.
    pub fn filter_array<F>(&self, path: &str, predicate: F) -> QueryResult
    where
        F: Fn(&JsonValue) -> bool,
    {
        let start = Instant::now();
        let resolved = self.get_array_elements(path, None, None);
        if !resolved.is_success() {
            return resolved;
        }

        let results = resolved
            .into_results()
            .into_iter()
            .filter(|item| predicate(item))
            .collect();
        QueryResult::success(
            results,
            format!("filter_array('{}', predicate)", path),
            start.elapsed(),
        )
    }
}

/// Evaluates one query against `root`.
pub fn execute_json_path(root: &JsonValue, query: &str) -> QueryResult {
    QueryService::new(root).execute_json_path(query)
}

/// True when the query needs the segment evaluator: recursive descent,
/// filters, slices, index lists, functions, or more than one bracket.
pub fn is_advanced_query(query: &str) -> bool {
    query.contains("..")
        || query.contains("[?")
        || query.contains(':')
        || query.contains(',')
        || query.contains("()")
        || query.matches('[').count() > 1
}

fn fmt_option(value: Option<usize>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "none".to_string())
}
