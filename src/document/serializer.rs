//! JSON serialization of document values.
//!
//! `JsonValue` implements `serde::Serialize`, so any serde-based writer can emit
//! it. The helpers here cover the two layouts the command line prints: pretty
//! with a configurable indent width, and compact.

use super::node::{JsonNumber, JsonValue};
use anyhow::Result;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

impl Serialize for JsonNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonNumber::Integer(i) => serializer.serialize_i64(*i),
            JsonNumber::Float(f) => serializer.serialize_f64(*f),
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => n.serialize(serializer),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (key, value) in fields {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Serializes any serializable value with `indent` spaces per level.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String> {
    let indent_str = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_str.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Serializes a value on a single line with no insignificant whitespace.
pub fn to_compact_string(value: &JsonValue) -> String {
    // Serializing into memory cannot fail for this type.
    serde_json::to_string(value).unwrap_or_default()
}
