//! JSON value representation.
//!
//! This module provides the core data structure for representing JSON documents
//! in jsonextractor. Objects keep their keys in insertion order, which is the
//! order every query and search walks them in.
//!
//! # Example
//!
//! ```
//! use jsonextractor::document::node::{JsonNumber, JsonValue};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), JsonValue::String("jsonextractor".to_string()));
//! map.insert("version".to_string(), JsonValue::Number(JsonNumber::Integer(1)));
//! let object = JsonValue::Object(map);
//!
//! assert!(object.is_object());
//! assert_eq!(object.get("version"), Some(&JsonValue::Number(JsonNumber::Integer(1))));
//! ```

use indexmap::IndexMap;

/// Represents JSON numbers (integer or float)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonNumber::Integer(i) => write!(f, "{}", i),
            JsonNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl JsonNumber {
    pub fn as_f64(&self) -> f64 {
        match self {
            JsonNumber::Integer(i) => *i as f64,
            JsonNumber::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, JsonNumber::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, JsonNumber::Float(_))
    }
}

/// A JSON value.
///
/// This enum represents the core JSON types: objects, arrays, strings, numbers,
/// booleans, and null. The query engine only ever reads these values; a parsed
/// document is shared through [`crate::document::tree::JsonTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    /// A JSON object containing key-value pairs in insertion order
    Object(IndexMap<String, JsonValue>),
    /// A JSON array containing ordered values
    Array(Vec<JsonValue>),
    /// A JSON string
    String(String),
    /// A JSON number (integer or float)
    Number(JsonNumber),
    /// A JSON boolean
    Boolean(bool),
    /// A JSON null value
    Null,
}

impl JsonValue {
    /// Returns true if this value is an object.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonextractor::document::node::{JsonValue, JsonNumber};
    /// use indexmap::IndexMap;
    ///
    /// let obj = JsonValue::Object(IndexMap::new());
    /// assert!(obj.is_object());
    ///
    /// let num = JsonValue::Number(JsonNumber::Integer(42));
    /// assert!(!num.is_object());
    /// ```
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns true if this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this value is a container (object or array).
    pub fn is_container(&self) -> bool {
        matches!(self, JsonValue::Object(_) | JsonValue::Array(_))
    }

    /// Looks up a property by exact name. Non-objects have no properties.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Direct children in document order: property values for objects,
    /// elements for arrays, nothing for scalars.
    pub fn children(&self) -> Box<dyn DoubleEndedIterator<Item = &JsonValue> + '_> {
        match self {
            JsonValue::Object(fields) => Box::new(fields.values()),
            JsonValue::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Returns the JSON type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Boolean(_) => "boolean",
            JsonValue::Null => "null",
        }
    }

    /// Canonical text of a value: strings verbatim, numbers in decimal,
    /// `true`/`false`, `null`, and compact JSON for containers.
    pub fn to_text(&self) -> String {
        match self {
            JsonValue::String(s) => s.clone(),
            JsonValue::Number(n) => n.to_string(),
            JsonValue::Boolean(b) => b.to_string(),
            JsonValue::Null => "null".to_string(),
            JsonValue::Object(_) | JsonValue::Array(_) => {
                crate::document::serializer::to_compact_string(self)
            }
        }
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<i64> for JsonValue {
    fn from(i: i64) -> Self {
        JsonValue::Number(JsonNumber::Integer(i))
    }
}

impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        JsonValue::Number(JsonNumber::Float(f))
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Boolean(b)
    }
}
