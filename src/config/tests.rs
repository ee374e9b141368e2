//! Tests for config functionality.

use crate::config::{CONFIG_FILE_NAME, Config, OutputMode};
use crate::error::CkeError;
use crate::test_support::DirGuard;
use serial_test::serial;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.out, OutputMode::Stdout);
    assert_eq!(config.output_dir, "_rendered");
    assert_eq!(config.extension, "cke");
    assert!(config.exclude.is_empty());
}

#[test]
fn test_parse_minimal_yaml() {
    let config = Config::from_yaml("").unwrap();
    assert_eq!(config.out, OutputMode::Stdout);
    assert_eq!(config.output_dir, "_rendered");
}

#[test]
fn test_parse_full_yaml() {
    let yaml = r#"
out: files
output_dir: build/_rendered
extension: kcfg
exclude:
  - "vendor/**"
  - "**/*_test.kcfg"
"#;
    let config = Config::from_yaml(yaml).unwrap();

    assert_eq!(config.out, OutputMode::Files);
    assert_eq!(config.output_dir, "build/_rendered");
    assert_eq!(config.extension, "kcfg");
    assert_eq!(config.exclude.len(), 2);
    assert_eq!(config.output_path(), Path::new("build/_rendered"));
}

#[test]
fn test_unknown_fields_ignored() {
    let yaml = r#"
out: stdout
future_option: true
"#;
    let config = Config::from_yaml(yaml).unwrap();
    assert_eq!(config.out, OutputMode::Stdout);
}

#[test]
fn test_invalid_out_value_rejected() {
    let result = Config::from_yaml("out: disk\n");
    assert!(matches!(result, Err(CkeError::Config(_))));
}

#[test]
fn test_extension_with_leading_dot_rejected() {
    let err = Config::from_yaml("extension: .cke\n").unwrap_err();
    assert!(err.to_string().contains("Use 'cke' instead"));
}

#[test]
fn test_empty_extension_rejected() {
    let err = Config::from_yaml("extension: \"\"\n").unwrap_err();
    assert!(err.to_string().contains("extension must be non-empty"));
}

#[test]
fn test_empty_output_dir_rejected() {
    let err = Config::from_yaml("output_dir: \" \"\n").unwrap_err();
    assert!(err.to_string().contains("output_dir"));
}

#[test]
fn test_invalid_exclude_glob_rejected() {
    let err = Config::from_yaml("exclude:\n  - \"a/[b\"\n").unwrap_err();
    assert!(err.to_string().contains("invalid glob"));
}

#[test]
fn test_exclude_set_matches() {
    let config = Config::from_yaml("exclude:\n  - \"vendor/**\"\n").unwrap();
    let set = config.exclude_set().unwrap();
    assert!(set.is_match("vendor/lib/a.cke"));
    assert!(!set.is_match("app/a.cke"));
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.yaml");
    let result = Config::resolve(Some(missing.as_path()));
    assert!(matches!(result, Err(CkeError::Config(_))));
}

#[test]
#[serial]
fn test_resolve_uses_file_in_current_directory() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(CONFIG_FILE_NAME), "out: files\n").unwrap();
    let _guard = DirGuard::new(temp.path());

    let config = Config::resolve(None).unwrap();
    assert_eq!(config.out, OutputMode::Files);
}

#[test]
#[serial]
fn test_resolve_defaults_without_file() {
    let temp = TempDir::new().unwrap();
    let _guard = DirGuard::new(temp.path());

    let config = Config::resolve(None).unwrap();
    assert_eq!(config.out, OutputMode::Stdout);
}
