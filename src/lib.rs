//! jsonextractor - parse, query, format and export JSON documents.
//!
//! The library side holds the document model ([`document`]), the JSONPath
//! engine ([`jsonpath`]), input/output helpers ([`file`]), the exporters
//! ([`export`]) and the configuration ([`config`]).
//!
//! # Example
//!
//! ```
//! use jsonextractor::document::parser::{parse_json, ParseOptions};
//! use jsonextractor::jsonpath::QueryService;
//!
//! let tree = parse_json(r#"{"items": [1, 2, 3]}"#, &ParseOptions::default()).unwrap();
//! let result = QueryService::new(tree.root()).execute_json_path("$.items.length()");
//! assert_eq!(result.single_result().map(|v| v.to_text()), Some("3".to_string()));
//! ```

pub mod config;
pub mod document;
pub mod export;
pub mod file;
pub mod jsonpath;
