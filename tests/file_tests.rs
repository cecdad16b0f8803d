//! Integration tests for file I/O operations.

use flate2::write::GzEncoder;
use flate2::Compression;
use jsonextractor::document::parser::ParseOptions;
use jsonextractor::file::loader::{load_json_file, read_file_text, LoadOptions};
use jsonextractor::file::saver::write_output;
use jsonextractor::jsonpath::execute_json_path;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_simple_json_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, r#"{{"name": "test"}}"#).unwrap();

    let tree = load_json_file(temp_file.path(), &LoadOptions::default()).unwrap();
    assert_eq!(tree.root().get("name").and_then(|v| v.as_str()), Some("test"));
}

#[test]
fn test_load_then_query() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(
        temp_file,
        r#"{{
        "user": {{
            "name": "Alice",
            "roles": ["admin", "dev"]
        }}
    }}"#
    )
    .unwrap();

    let tree = load_json_file(temp_file.path(), &LoadOptions::default()).unwrap();
    let result = execute_json_path(tree.root(), "$.user.roles.length()");
    assert_eq!(result.single_result().map(|v| v.to_text()), Some("2".to_string()));
}

#[test]
fn test_load_invalid_json_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{{not json").unwrap();

    let err = load_json_file(temp_file.path(), &LoadOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "Failed to parse JSON");
}

#[test]
fn test_load_empty_file() {
    let temp_file = NamedTempFile::new().unwrap();
    let err = load_json_file(temp_file.path(), &LoadOptions::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("JSON input cannot be null or empty"));
}

#[test]
fn test_load_missing_file() {
    let err = load_json_file("/no/such/file.json", &LoadOptions::default()).unwrap_err();
    assert_eq!(err.to_string(), "File not found: /no/such/file.json");
}

#[test]
fn test_load_respects_max_depth() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "[[[[1]]]]").unwrap();

    let options = LoadOptions {
        parse: ParseOptions {
            max_depth: 3,
            ..ParseOptions::default()
        },
        ..LoadOptions::default()
    };
    let err = load_json_file(temp_file.path(), &options).unwrap_err();
    assert!(format!("{:#}", err).contains("exceeds the maximum of 3"));

    assert!(load_json_file(temp_file.path(), &LoadOptions::default()).is_ok());
}

#[test]
fn test_load_respects_max_file_size() {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, r#"{{"padding": "{}"}}"#, "x".repeat(100)).unwrap();

    let options = LoadOptions {
        max_file_size: 50,
        ..LoadOptions::default()
    };
    let err = load_json_file(temp_file.path(), &options).unwrap_err();
    assert!(err.to_string().contains("exceeds the maximum of 50 bytes"));
}

#[test]
fn test_load_gzipped_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json.gz");

    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(br#"{"items": [1, 2, 3]}"#).unwrap();
    encoder.finish().unwrap();

    let tree = load_json_file(&path, &LoadOptions::default()).unwrap();
    assert_eq!(tree.node_count(), 5);
}

#[test]
fn test_write_output_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    for name in ["out.json", "out.json.gz"] {
        let path = dir.path().join(name);
        write_output(&path, r#"{"ok": true}"#).unwrap();

        let text = read_file_text(&path, 1024).unwrap();
        assert_eq!(text, r#"{"ok": true}"#, "{}", name);
    }
}
