use crate::document::node::JsonValue;
use anyhow::{bail, Context, Result};

/// Writes objects as CSV rows.
///
/// The header is taken from the first object's keys. Later rows are aligned
/// to that header: missing keys become empty cells and extra keys are
/// dropped. No results gives an empty string.
pub fn export_csv(results: &[JsonValue], delimiter: u8) -> Result<String> {
    let Some(first) = results.first() else {
        return Ok(String::new());
    };
    let JsonValue::Object(first_fields) = first else {
        bail!(
            "CSV export requires objects, but element 0 is {}",
            first.type_name()
        );
    };
    let headers: Vec<&str> = first_fields.keys().map(String::as_str).collect();

    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;

    for (index, item) in results.iter().enumerate() {
        let JsonValue::Object(fields) = item else {
            bail!(
                "CSV export requires objects, but element {} is {}",
                index,
                item.type_name()
            );
        };
        let row: Vec<String> = headers
            .iter()
            .map(|h| fields.get(*h).map(JsonValue::to_text).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}
