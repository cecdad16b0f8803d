use jsonextractor::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.json.indent_size, 2);
    assert_eq!(config.json.max_depth, 128);
    assert_eq!(config.json.max_file_size, 104_857_600); // 100MB
    assert!(config.json.allow_comments);
    assert!(config.json.allow_trailing_commas);
    assert_eq!(config.export.default_format, "json");
    assert_eq!(config.export.csv_delimiter, ",");
    assert_eq!(config.export.xml_root, "Results");
    assert_eq!(config.export.xml_item, "Item");
}

#[test]
fn test_serialize_default_config() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).expect("Failed to serialize config");

    assert!(toml_str.contains("[logging]"));
    assert!(toml_str.contains("level = \"warn\""));
    assert!(toml_str.contains("[json]"));
    assert!(toml_str.contains("indent_size = 2"));
    assert!(toml_str.contains("max_depth = 128"));
    assert!(toml_str.contains("allow_trailing_commas = true"));
    assert!(toml_str.contains("[export]"));
    assert!(toml_str.contains("xml_root = \"Results\""));
}

#[test]
fn test_config_roundtrip() {
    let mut config = Config::default();
    config.json.indent_size = 4;
    config.export.default_format = "csv".to_string();
    config.export.csv_delimiter = ";".to_string();

    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_partial_config_fills_defaults() {
    let parsed: Config = toml::from_str(
        r#"
        [export]
        xml_root = "Data"
        "#,
    )
    .unwrap();

    assert_eq!(parsed.export.xml_root, "Data");
    assert_eq!(parsed.export.xml_item, "Item");
    assert_eq!(parsed.json.indent_size, 2);
    assert_eq!(parsed.logging.level, "warn");
    assert!(parsed.json.allow_comments);
}

#[test]
fn test_strict_parsing_from_config() {
    let parsed: Config = toml::from_str(
        r#"
        [json]
        allow_comments = false
        allow_trailing_commas = false
        "#,
    )
    .unwrap();

    let options = parsed.load_options();
    assert!(!options.parse.allow_comments);
    assert!(!options.parse.allow_trailing_commas);
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[logging]\nlevel = \"debug\"\n\n[json]\nmax_depth = 8").unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.json.max_depth, 8);
    assert_eq!(config.load_options().parse.max_depth, 8);
}

#[test]
fn test_load_from_invalid_file_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[json]\nindent_size = \"wide\"").unwrap();
    assert!(Config::load_from(file.path()).is_err());

    assert!(Config::load_from("/nonexistent/config.toml").is_err());
}

#[test]
fn test_save_to_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::default();
    config.export.xml_item = "Row".to_string();
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_config_path_location() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/jsonextractor/config.toml"));
    }
}
