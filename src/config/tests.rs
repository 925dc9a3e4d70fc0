use super::{Config, ConfigKey, models::*};
use crate::core::types::{DropDatePolicy, ViewKind, WeekStart};
use crate::errors::Error;
use crate::logging::LogLevel;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn temp_path() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let uniq = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("blockgrid-config-test-{nanos}-{uniq}.json"))
}

fn sample_config_file(path: &std::path::Path) {
    let json = r#"{
  "pixels_per_hour": { "value": 60.0, "description": "row height" },
  "week_start": { "value": "monday", "description": "week start" },
  "default_view": { "value": "week", "description": "view" },
  "default_duration": { "value": 45, "description": "duration" },
  "drop_date_policy": { "value": "column", "description": "drop date" },
  "log_level": { "value": "debug", "description": "level" },
  "file_logging_enabled": { "value": "False", "description": "file logging" }
}"#;
    fs::write(path, json).unwrap();
}

fn minimal_config_file(path: &std::path::Path) {
    let json = r#"{
  "pixels_per_hour": { "value": 80, "description": "row height" },
  "week_start": { "value": "sunday", "description": "week start" }
}"#;
    fs::write(path, json).unwrap();
}

#[test]
fn load_from_reads_every_item() {
    let path = temp_path();
    sample_config_file(&path);
    let cfg = Config::load_from(&path).expect("config should load");

    assert_eq!(cfg.pixels_per_hour(), 60.0);
    assert_eq!(cfg.grid_scale().pixels_per_hour(), 60.0);
    assert_eq!(cfg.week_start(), WeekStart::Monday);
    assert_eq!(cfg.default_view(), ViewKind::Week);
    assert_eq!(cfg.default_duration(), 45);
    assert_eq!(cfg.drop_date_policy(), DropDatePolicy::Column);
    assert_eq!(cfg.log_level(), LogLevel::Debug);
    assert!(!cfg.file_logging_enabled());

    let rows = cfg.rows();
    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0].0, "PIXELS_PER_HOUR");
    assert_eq!(rows[0].2, "60");
    assert!(rows.iter().any(|(k, _, v)| k == "LOG_LEVEL" && v == "debug"));
}

#[test]
fn optional_items_fall_back_to_defaults() {
    let path = temp_path();
    minimal_config_file(&path);
    let cfg = Config::load_from(&path).unwrap();

    assert_eq!(cfg.default_view(), ViewKind::Day);
    assert_eq!(cfg.default_duration(), 60);
    assert_eq!(cfg.drop_date_policy(), DropDatePolicy::Today);
    assert_eq!(cfg.log_level(), LogLevel::Info);
    assert!(cfg.file_logging_enabled());
}

#[test]
fn load_from_reports_missing_file() {
    let path = temp_path();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let expected = format!("Configuration file '{}' not found.", path.display());
            assert_eq!(msg, expected);
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_reports_invalid_json() {
    let path = temp_path();
    fs::write(&path, "{").unwrap();
    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => {
            let prefix = format!("Invalid JSON in '{}':", path.display());
            assert!(msg.starts_with(&prefix));
        }
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_reports_read_error_for_directory() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("blockgrid-config-read-dir-{nanos}"));
    fs::create_dir_all(&path).unwrap();

    let err = Config::load_from(&path).unwrap_err();
    match err {
        Error::Config(msg) => assert!(msg.starts_with("Failed to read")),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_reports_missing_required_item() {
    let path = temp_path();
    fs::write(
        &path,
        r#"{ "pixels_per_hour": { "value": 80, "description": "row height" } }"#,
    )
    .unwrap();
    match Config::load_from(&path).unwrap_err() {
        Error::ConfigItemMissing { item } => assert_eq!(item, "week_start"),
        other => panic!("expected missing item, got {other:?}"),
    }
}

#[test]
fn load_from_rejects_non_positive_scale() {
    let path = temp_path();
    fs::write(
        &path,
        r#"{
  "pixels_per_hour": { "value": 0, "description": "row height" },
  "week_start": { "value": "sunday", "description": "week start" }
}"#,
    )
    .unwrap();
    match Config::load_from(&path).unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("positive")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn load_from_rejects_short_default_duration() {
    let path = temp_path();
    fs::write(
        &path,
        r#"{
  "pixels_per_hour": { "value": 80, "description": "row height" },
  "week_start": { "value": "sunday", "description": "week start" },
  "default_duration": { "value": 10, "description": "duration" }
}"#,
    )
    .unwrap();
    match Config::load_from(&path).unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("at least 15")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn default_duration_is_capped_at_one_week() {
    let path = temp_path();
    minimal_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    match cfg.set_key(ConfigKey::DefaultDuration, "10081").unwrap_err() {
        Error::Validation(msg) => assert!(msg.contains("at most 10080")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(cfg.set_key(ConfigKey::DefaultDuration, "9223372036854775807").is_err());
    assert_eq!(cfg.default_duration(), 60);

    cfg.set_key(ConfigKey::DefaultDuration, "10080").unwrap();
    assert_eq!(cfg.default_duration(), 10_080);
}

#[test]
fn set_key_updates_value_file_and_last_change() {
    let path = temp_path();
    minimal_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    cfg.set_key(ConfigKey::WeekStart, "Saturday").unwrap();
    assert_eq!(cfg.week_start(), WeekStart::Saturday);
    assert_eq!(
        cfg.take_last_change(),
        Some((
            "WEEK_START".to_string(),
            "sunday".to_string(),
            "saturday".to_string()
        ))
    );
    assert!(cfg.take_last_change().is_none());

    let reloaded = Config::load_from(&path).unwrap();
    assert_eq!(reloaded.week_start(), WeekStart::Saturday);
}

#[test]
fn set_parses_key_names_case_insensitively() {
    let path = temp_path();
    minimal_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();

    cfg.set("pixels_per_hour", "120").unwrap();
    assert_eq!(cfg.pixels_per_hour(), 120.0);
    cfg.set("DROP_DATE_POLICY", "column").unwrap();
    assert_eq!(cfg.drop_date_policy(), DropDatePolicy::Column);
}

#[test]
fn set_rejects_unknown_key() {
    let path = temp_path();
    minimal_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();
    match cfg.set("ROW_HEIGHT", "1").unwrap_err() {
        Error::Parse(msg) => {
            assert!(msg.starts_with("Unknown configuration key 'ROW_HEIGHT'."));
            assert!(msg.contains("PIXELS_PER_HOUR"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn set_by_index_rejects_invalid_id() {
    let path = temp_path();
    minimal_config_file(&path);
    let mut cfg = Config::load_from(&path).unwrap();
    match cfg.set_by_index(99, "x").unwrap_err() {
        Error::Parse(msg) => assert_eq!(msg, "Invalid ID: 99"),
        other => panic!("expected parse error, got {other:?}"),
    }
    cfg.set_by_index(3, "30").unwrap();
    assert_eq!(cfg.default_duration(), 30);
}

#[test]
fn failed_set_leaves_value_and_file_untouched() {
    let path = temp_path();
    minimal_config_file(&path);
    let before = fs::read_to_string(&path).unwrap();
    let mut cfg = Config::load_from(&path).unwrap();

    assert!(cfg.set_key(ConfigKey::PixelsPerHour, "-5").is_err());
    assert!(cfg.set_key(ConfigKey::DefaultDuration, "5").is_err());
    assert!(cfg.set_key(ConfigKey::LogLevel, "loud").is_err());
    assert_eq!(cfg.pixels_per_hour(), 80.0);
    assert_eq!(cfg.default_duration(), 60);
    assert!(cfg.take_last_change().is_none());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn create_default_writes_loadable_file() {
    let path = temp_path();
    let cfg = Config::create_default(&path, WeekStart::Monday).unwrap();
    assert_eq!(cfg.path(), path.as_path());

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.week_start(), WeekStart::Monday);
    assert_eq!(loaded.pixels_per_hour(), 80.0);
    assert_eq!(loaded.default_duration(), 60);
}

#[test]
fn config_items_validate_and_set() {
    let mut ppu = PixelsPerHourConfigItem::default();
    ppu.set_value("96").unwrap();
    assert_eq!(*ppu.get_value(), 96.0);
    match ppu.set_value("tall").unwrap_err() {
        Error::Parse(msg) => assert!(msg.contains("'tall'")),
        other => panic!("expected parse error, got {other:?}"),
    }

    let mut duration = DefaultDurationConfigItem::default();
    duration.set_value("15").unwrap();
    assert_eq!(*duration.get_value(), 15);

    let mut view = DefaultViewConfigItem::default();
    view.set_value("month").unwrap();
    assert_eq!(*view.get_value(), ViewKind::Month);

    let mut file_logging = FileLoggingConfigItem::default();
    file_logging.set_value("false").unwrap();
    assert!(!file_logging.get_value().0);
    assert!(!file_logging.description().is_empty());
}
