//! Exporters that render query results as CSV, XML or JSON.
//!
//! - csv.rs: one row per object, header from the first object's keys
//! - xml.rs: nested elements under a configurable root
//! - json.rs: a single value or an array, pretty or compact

use crate::document::node::JsonValue;
use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

pub mod csv;
pub mod json;
pub mod xml;

/// Output format of the `export` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xml,
    Json,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xml" => Ok(ExportFormat::Xml),
            "json" => Ok(ExportFormat::Json),
            _ => bail!("Unsupported export format: {}", s),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xml => "xml",
            ExportFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Settings shared by all exporters; each format reads the fields it needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub csv_delimiter: u8,
    pub xml_root: String,
    pub xml_item: String,
    pub indent: usize,
    pub compact: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Json,
            csv_delimiter: b',',
            xml_root: "Results".to_string(),
            xml_item: "Item".to_string(),
            indent: 2,
            compact: false,
        }
    }
}

/// Parses a delimiter setting, which must be exactly one ASCII character.
pub fn parse_delimiter(text: &str) -> Result<u8> {
    match text.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => bail!("CSV delimiter must be a single ASCII character, got '{}'", text),
    }
}

/// Renders `results` in the configured format.
pub fn export(results: &[JsonValue], options: &ExportOptions) -> Result<String> {
    log::debug!("Exporting {} results as {}", results.len(), options.format);
    match options.format {
        ExportFormat::Csv => self::csv::export_csv(results, options.csv_delimiter),
        ExportFormat::Xml => self::xml::export_xml(results, &options.xml_root, &options.xml_item),
        ExportFormat::Json => self::json::export_json(results, options.indent, options.compact),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("xml".parse::<ExportFormat>().unwrap(), ExportFormat::Xml);
        assert_eq!("Json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);

        let err = "yaml".parse::<ExportFormat>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported export format: yaml");
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("\t").unwrap(), b'\t');
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter("::").is_err());
        assert!(parse_delimiter("é").is_err());
    }
}
