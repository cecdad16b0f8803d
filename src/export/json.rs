use crate::document::node::JsonValue;
use crate::document::serializer::to_pretty_string;
use anyhow::{Context, Result};

/// Writes a single result as itself and anything else as an array.
pub fn export_json(results: &[JsonValue], indent: usize, compact: bool) -> Result<String> {
    match (results, compact) {
        ([only], true) => serde_json::to_string(only).context("Failed to serialize JSON"),
        ([only], false) => to_pretty_string(only, indent),
        (all, true) => serde_json::to_string(all).context("Failed to serialize JSON"),
        (all, false) => to_pretty_string(all, indent),
    }
}
