use crate::color::ColorScheme;
use crate::conf::types::{DisplaySection, FilterSection, MergeSection};
use crate::conf::{ConfigError, LogmergeConfig, load_config};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn empty_file_yields_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "").unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(config, LogmergeConfig::default());
}

#[test]
fn parses_every_section() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(
        &path,
        r#"
merge = {
  batch_size       = 5
  channel_capacity = 10
  max_entry_size   = 1024
  stale_timeout_ms = 2500
}

display = {
  color      = "light"
  full_names = true
}

filter = {
  grep      = "SomeException"
  highlight = "ERROR|WARN"
}
"#,
    )
    .unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(
        config,
        LogmergeConfig {
            merge: MergeSection {
                batch_size: Some(5),
                channel_capacity: Some(10),
                max_entry_size: Some(1024),
                stale_timeout_ms: Some(2500),
            },
            display: DisplaySection {
                color: Some(ColorScheme::Light),
                full_names: Some(true),
            },
            filter: FilterSection {
                grep: Some("SomeException".to_string()),
                highlight: Some("ERROR|WARN".to_string()),
            },
        }
    );
}

#[test]
fn partial_sections_leave_the_rest_unset() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "display = {\n  color = \"off\"\n}\n").unwrap();

    // Act
    let config = load_config(&path).unwrap();

    // Assert
    assert_eq!(config.display.color, Some(ColorScheme::Off));
    assert_eq!(config.merge, MergeSection::default());
}

#[test]
fn missing_file_is_a_read_error() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let result = load_config(&dir.path().join("nope.hcl"));

    // Assert
    assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
}

#[test]
fn unknown_fields_are_rejected() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "merge = {\n  batch = 5\n}\n").unwrap();

    // Act
    let result = load_config(&path);

    // Assert
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn zero_entry_size_is_rejected() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "merge = {\n  max_entry_size = 0\n}\n").unwrap();

    // Act
    let result = load_config(&path);

    // Assert
    match result {
        Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "merge.max_entry_size"),
        other => panic!("expected invalid value, got {other:?}"),
    }
}

#[test]
fn zero_channel_capacity_is_rejected() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "merge = {\n  channel_capacity = 0\n}\n").unwrap();

    // Act
    let result = load_config(&path);

    // Assert
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn broken_pattern_is_rejected() {
    // Arrange
    let dir = tempdir().unwrap();
    let path = dir.path().join("logmerge.hcl");
    fs::write(&path, "filter = {\n  highlight = \"(unclosed\"\n}\n").unwrap();

    // Act
    let result = load_config(&path);

    // Assert
    match result {
        Err(ConfigError::InvalidPattern { field, .. }) => assert_eq!(field, "filter.highlight"),
        other => panic!("expected invalid pattern, got {other:?}"),
    }
}
