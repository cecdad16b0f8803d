use crate::document::node::JsonValue;
use anyhow::{bail, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Writes results as XML, one `item` element per result under `root`.
///
/// Object properties become child elements named after their keys, array
/// elements become `Item0`, `Item1`, ... and null is an empty element
/// carrying `nil="true"`. Output is indented by two spaces.
pub fn export_xml(results: &[JsonValue], root: &str, item: &str) -> Result<String> {
    check_name(root)?;
    check_name(item)?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    if results.is_empty() {
        writer.write_event(Event::Empty(BytesStart::new(root)))?;
    } else {
        writer.write_event(Event::Start(BytesStart::new(root)))?;
        for value in results {
            write_element(&mut writer, item, value)?;
        }
        writer.write_event(Event::End(BytesEnd::new(root)))?;
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, name: &str, value: &JsonValue) -> Result<()> {
    check_name(name)?;

    match value {
        JsonValue::Null => {
            let mut start = BytesStart::new(name);
            start.push_attribute(("nil", "true"));
            writer.write_event(Event::Empty(start))?;
        }
        JsonValue::Object(fields) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (key, child) in fields {
                write_element(writer, key, child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        JsonValue::Array(items) => {
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            for (index, child) in items.iter().enumerate() {
                write_element(writer, &format!("Item{}", index), child)?;
            }
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        scalar => {
            let text = scalar.to_text();
            writer.write_event(Event::Start(BytesStart::new(name)))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
    }

    Ok(())
}

/// Element names start with a letter or `_` and continue with letters,
/// digits, `_`, `-` or `.`; the `xml` prefix is reserved.
fn check_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|ch| ch.is_alphabetic() || ch == '_');
    let valid_rest = chars.all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'));
    if !valid_start || !valid_rest || name.to_ascii_lowercase().starts_with("xml") {
        bail!("'{}' is not a valid XML element name", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_value;

    #[test]
    fn test_object_export() {
        let person = parse_value(&serde_json::json!({"name": "Alice", "age": 30}));
        let xml = export_xml(&[person], "Results", "Item").unwrap();
        assert_eq!(
            xml,
            "<Results>\n  <Item>\n    <name>Alice</name>\n    <age>30</age>\n  </Item>\n</Results>"
        );
    }

    #[test]
    fn test_arrays_and_null() {
        let value = parse_value(&serde_json::json!({"tags": ["a", "b"], "isbn": null}));
        let xml = export_xml(&[value], "Books", "Book").unwrap();
        assert!(xml.starts_with("<Books>"));
        assert!(xml.contains("<Item0>a</Item0>"));
        assert!(xml.contains("<Item1>b</Item1>"));
        assert!(xml.contains(r#"<isbn nil="true"/>"#));
    }

    #[test]
    fn test_scalars_are_escaped() {
        let xml = export_xml(&[JsonValue::from("a < b & c")], "Results", "Item").unwrap();
        assert!(xml.contains("<Item>a &lt; b &amp; c</Item>"));
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(export_xml(&[], "Results", "Item").unwrap(), "<Results/>");
    }

    #[test]
    fn test_invalid_names_rejected() {
        let value = parse_value(&serde_json::json!({"first name": "x"}));
        assert!(export_xml(&[value], "Results", "Item").is_err());
        assert!(export_xml(&[], "1root", "Item").is_err());
        assert!(export_xml(&[], "Results", "xmlItem").is_err());
    }
}
