//! Whole-tree searches by key or by scalar value.
//!
//! Both walks are pre-order (object values in insertion order, array
//! elements in index order) and use an explicit stack, so document depth is
//! bounded only by memory.

use super::filter::eq_ignore_case;
use crate::document::node::{JsonNumber, JsonValue};
use std::fmt;

const FLOAT_TOLERANCE: f64 = 1e-4;

/// A scalar to look for with [`find_by_value`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl SearchValue {
    /// Interprets command-line text: `true`/`false`, then integers, then
    /// floats, otherwise a string.
    pub fn infer(text: &str) -> Self {
        match text {
            "true" => return SearchValue::Boolean(true),
            "false" => return SearchValue::Boolean(false),
            _ => {}
        }
        if let Ok(i) = text.parse::<i64>() {
            return SearchValue::Integer(i);
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => SearchValue::Float(f),
            _ => SearchValue::String(text.to_string()),
        }
    }

    fn matches(&self, leaf: &JsonValue, case_sensitive: bool) -> bool {
        match (self, leaf) {
            (SearchValue::String(target), JsonValue::String(s)) => {
                if case_sensitive {
                    s == target
                } else {
                    eq_ignore_case(s, target)
                }
            }
            (SearchValue::Integer(target), JsonValue::Number(JsonNumber::Integer(n))) => n == target,
            (SearchValue::Float(target), JsonValue::Number(n)) => {
                (n.as_f64() - target).abs() < FLOAT_TOLERANCE
            }
            (SearchValue::Boolean(target), JsonValue::Boolean(b)) => b == target,
            _ => false,
        }
    }
}

impl fmt::Display for SearchValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchValue::String(s) => f.write_str(s),
            SearchValue::Integer(i) => write!(f, "{}", i),
            SearchValue::Float(x) => write!(f, "{}", x),
            SearchValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Values of every property whose name equals `key`, at any depth.
///
/// Descent continues below a matching property, so nested matches are
/// reported after their ancestors.
pub fn find_by_key<'a>(root: &'a JsonValue, key: &str, case_sensitive: bool) -> Vec<&'a JsonValue> {
    let key_matches = |name: &str| {
        if case_sensitive {
            name == key
        } else {
            eq_ignore_case(name, key)
        }
    };

    let mut results = Vec::new();
    let mut stack: Vec<(Option<&str>, &JsonValue)> = vec![(None, root)];
    while let Some((name, node)) = stack.pop() {
        if name.is_some_and(|n| key_matches(n)) {
            results.push(node);
        }
        match node {
            JsonValue::Object(fields) => {
                stack.extend(fields.iter().rev().map(|(k, v)| (Some(k.as_str()), v)));
            }
            JsonValue::Array(items) => {
                stack.extend(items.iter().rev().map(|v| (None, v)));
            }
            _ => {}
        }
    }
    results
}

/// Scalar leaves equal to `target`. Containers are searched, never matched.
pub fn find_by_value<'a>(
    root: &'a JsonValue,
    target: &SearchValue,
    case_sensitive: bool,
) -> Vec<&'a JsonValue> {
    let mut results = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_container() {
            stack.extend(node.children().rev());
        } else if target.matches(node, case_sensitive) {
            results.push(node);
        }
    }
    results
}
