//! JSON parsing into the document model.
//!
//! Text is read with the `serde_json_lenient` deserializer, which can skip
//! comments and trailing commas, into a `serde_json::Value` (built with
//! `preserve_order`, so object keys keep their source order) and converted
//! into [`JsonValue`]s. With both leniency switches off the accepted grammar
//! is strict JSON.
//!
//! # Example
//!
//! ```
//! use jsonextractor::document::parser::{parse_json, ParseOptions};
//!
//! let json = r#"{"name": "Alice", "age": 30}"#;
//! let tree = parse_json(json, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(tree.root().get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use super::node::{JsonNumber, JsonValue};
use super::tree::{depth_of, JsonTree};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value as SerdeValue;

/// Default nesting limit applied to parsed documents. This is also the
/// deserializer's own recursion ceiling, so deeper input never parses.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits and leniency applied while turning text into a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest container nesting accepted
    pub max_depth: usize,
    /// Skip `//` line comments and `/* */` block comments
    pub allow_comments: bool,
    /// Accept a comma after the last element of an array or object
    pub allow_trailing_commas: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_comments: true,
            allow_trailing_commas: true,
        }
    }
}

impl ParseOptions {
    /// Plain RFC 8259 JSON: no comments, no trailing commas.
    pub fn strict() -> Self {
        Self {
            allow_comments: false,
            allow_trailing_commas: false,
            ..Self::default()
        }
    }
}

/// Parses JSON text into a tree.
///
/// # Errors
///
/// Fails when the input is blank, is not valid JSON, or nests deeper than
/// `options.max_depth`.
pub fn parse_json(json: &str, options: &ParseOptions) -> Result<JsonTree> {
    if json.trim().is_empty() {
        bail!("JSON input cannot be null or empty");
    }

    let value: SerdeValue = deserialize(json, options)?;
    let root = parse_value(&value);

    let depth = depth_of(&root);
    if depth > options.max_depth {
        bail!(
            "JSON nesting depth {} exceeds the maximum of {}",
            depth,
            options.max_depth
        );
    }

    log::debug!("Parsed JSON document with depth {}", depth);
    Ok(JsonTree::new(root))
}

/// Checks whether the text is well-formed JSON without building a tree.
///
/// Only the leniency switches of `options` apply; depth is not checked.
pub fn validate_json(json: &str, options: &ParseOptions) -> Result<()> {
    deserialize::<serde::de::IgnoredAny>(json, options)?;
    Ok(())
}

fn deserialize<'de, T: Deserialize<'de>>(json: &'de str, options: &ParseOptions) -> Result<T> {
    let mut deserializer = serde_json_lenient::Deserializer::from_str(json);
    deserializer.set_allow_comments(options.allow_comments);
    deserializer.set_ignore_trailing_commas(options.allow_trailing_commas);

    let value = T::deserialize(&mut deserializer).context("Invalid JSON")?;
    deserializer.end().context("Invalid JSON")?;
    Ok(value)
}

/// Converts a `serde_json` value into the document model.
pub fn parse_value(value: &SerdeValue) -> JsonValue {
    match value {
        SerdeValue::Null => JsonValue::Null,
        SerdeValue::Bool(b) => JsonValue::Boolean(*b),
        SerdeValue::Number(n) => JsonValue::Number(parse_number(n)),
        SerdeValue::String(s) => JsonValue::String(s.clone()),
        SerdeValue::Array(items) => JsonValue::Array(items.iter().map(parse_value).collect()),
        SerdeValue::Object(fields) => JsonValue::Object(
            fields
                .iter()
                .map(|(key, child)| (key.clone(), parse_value(child)))
                .collect(),
        ),
    }
}

fn parse_number(n: &serde_json::Number) -> JsonNumber {
    if let Some(i) = n.as_i64() {
        JsonNumber::Integer(i)
    } else {
        // u64 beyond i64::MAX and all fractional values
        JsonNumber::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}
