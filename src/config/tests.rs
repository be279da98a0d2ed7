//! Configuration tests
//!
//! Precedence (env > file > defaults) and the serialized config template.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// Verify that the serialized default config parses back to the same values.
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml().unwrap();

    let parsed: FileConfig = toml::from_str(&toml_str).unwrap_or_else(|e| {
        panic!("Default config should round-trip.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    assert_eq!(Config::from_sources(parsed, no_env), config);
}

#[test]
fn test_config_roundtrip_with_icons() {
    let mut config = Config::default();
    config.max_width = 64;
    config.theme = "mono".to_string();
    config.icons.insert("read".to_string(), "R".to_string());
    config.icons.insert("failure".to_string(), "!!".to_string());
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let toml_str = config.to_toml().unwrap();
    let parsed: FileConfig = toml::from_str(&toml_str).unwrap_or_else(|e| {
        panic!("Config with icons should round-trip.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    assert_eq!(Config::from_sources(parsed, no_env), config);
}

#[test]
fn test_config_roundtrip_with_quotes_and_escapes() {
    let mut config = Config::default();
    config.theme = r#"mo"no\"#.to_string();
    config.icons.insert("\u{1b}[0m".to_string(), "\"".to_string());
    config.icons.insert("rename".to_string(), "a\\b".to_string());
    config.logging.level = "pathtrail=debug,\"x\"".to_string();
    config.logging.file_dir = PathBuf::from(r#"C:\logs\"quoted""#);
    config.logging.file_prefix = "it's\ttabbed".to_string();

    let toml_str = config.to_toml().unwrap();
    let parsed: FileConfig = toml::from_str(&toml_str).unwrap_or_else(|e| {
        panic!("Escaped values should round-trip.\nTOML:\n{}\nError: {}", toml_str, e)
    });
    assert_eq!(Config::from_sources(parsed, no_env), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_gives_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config, Config::default());
    assert_eq!(config.max_width, 100);
}

#[test]
fn test_file_values_override_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
max_width = 80
theme = "mono"

[icons]
OPEN = "O"

[logging]
level = "debug"
file_rotation = "never"
"#,
    )
    .unwrap();

    let config = Config::from_sources(file, no_env);
    assert_eq!(config.max_width, 80);
    assert_eq!(config.theme, "mono");
    assert_eq!(config.icons.get("OPEN").map(String::as_str), Some("O"));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.file_prefix, "pathtrail");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str("max_width = 80\ntheme = \"mono\"").unwrap();
    let env = env_from(&[
        ("PATHTRAIL_MAX_WIDTH", "42"),
        ("PATHTRAIL_THEME", "auto"),
        ("PATHTRAIL_LOG_LEVEL", "trace"),
    ]);

    let config = Config::from_sources(file, env);
    assert_eq!(config.max_width, 42);
    assert_eq!(config.theme, "auto");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_invalid_or_zero_width_falls_back() {
    let config = Config::from_sources(
        FileConfig::default(),
        env_from(&[("PATHTRAIL_MAX_WIDTH", "wide")]),
    );
    assert_eq!(config.max_width, 100);

    let file: FileConfig = toml::from_str("max_width = 0").unwrap();
    assert_eq!(Config::from_sources(file, no_env).max_width, 100);
}

#[test]
fn test_unknown_rotation_is_a_parse_error() {
    let parsed = toml::from_str::<FileConfig>("[logging]\nfile_rotation = \"weekly\"");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Pipeline construction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_pipeline_uses_configured_width_and_icons() {
    let mut config = Config::default();
    config.max_width = 30;
    config.icons.insert("read".to_string(), "R".to_string());

    let formatter = config.row_formatter();
    assert_eq!(formatter.max_width(), 30);
    assert_eq!(formatter.icons().icon_for("READ", true), "R");
    assert_eq!(config.table_builder().formatter().max_width(), 30);
}
