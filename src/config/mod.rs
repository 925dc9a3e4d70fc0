pub mod models;
#[cfg(test)]
mod tests;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, DefaultDurationConfigItem, DefaultViewConfigItem, DropDatePolicyConfigItem,
    FileLoggingConfigItem, LogLevelConfigItem, PixelsPerHourConfigItem, WeekStartConfigItem,
};
use crate::core::types::{DropDatePolicy, ViewKind, WeekStart};
use crate::errors::{Error, Result, require_config_item};
use crate::extensions::enums::valid_csv;
use crate::logging::LogLevel;
use crate::scheduler::pointer::GridScale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    PixelsPerHour,
    WeekStart,
    DefaultView,
    DefaultDuration,
    DropDatePolicy,
    LogLevel,
    FileLoggingEnabled,
}

impl ConfigKey {
    /// Field name in the JSON file.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigKey::PixelsPerHour => "pixels_per_hour",
            ConfigKey::WeekStart => "week_start",
            ConfigKey::DefaultView => "default_view",
            ConfigKey::DefaultDuration => "default_duration",
            ConfigKey::DropDatePolicy => "drop_date_policy",
            ConfigKey::LogLevel => "log_level",
            ConfigKey::FileLoggingEnabled => "file_logging_enabled",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, ConfigKey::PixelsPerHour | ConfigKey::WeekStart)
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                s.trim(),
                valid_csv::<ConfigKey>()
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub pixels_per_hour: PixelsPerHourConfigItem,
    pub week_start: WeekStartConfigItem,
    #[serde(default)]
    pub default_view: DefaultViewConfigItem,
    #[serde(default)]
    pub default_duration: DefaultDurationConfigItem,
    #[serde(default)]
    pub drop_date_policy: DropDatePolicyConfigItem,
    #[serde(default)]
    pub log_level: LogLevelConfigItem,
    #[serde(default)]
    pub file_logging_enabled: FileLoggingConfigItem,
}

/// (key, old value, new value) of the most recent successful edit.
pub type ConfigChange = (String, String, String);

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    last_change: Option<ConfigChange>,
}

#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
    pub fn get(&self, index: usize) -> Option<&(String, String, String)> {
        self.0.get(index)
    }
}

impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let raw: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;

        for key in ConfigKey::iter().filter(ConfigKey::is_required) {
            require_config_item(raw.get(key.field()), key.field())?;
        }

        let data: ConfigFile = serde_json::from_value(raw)
            .map_err(|e| Error::config(format!("Invalid value in '{}': {}", path.display(), e)))?;
        data.pixels_per_hour.scale()?;
        DefaultDurationConfigItem::check(data.default_duration.value)?;

        Ok(Self {
            path,
            data,
            last_change: None,
        })
    }

    /// Fresh config with every item at its default, written to `path`.
    pub fn create_default<P: AsRef<Path>>(path: P, week_start: WeekStart) -> Result<Self> {
        let cfg = Self {
            path: path.as_ref().to_path_buf(),
            data: ConfigFile {
                pixels_per_hour: PixelsPerHourConfigItem::default(),
                week_start: WeekStartConfigItem {
                    value: week_start,
                    description: "First day of the week for week views and weekly stats.".into(),
                },
                default_view: DefaultViewConfigItem::default(),
                default_duration: DefaultDurationConfigItem::default(),
                drop_date_policy: DropDatePolicyConfigItem::default(),
                log_level: LogLevelConfigItem::default(),
                file_logging_enabled: FileLoggingConfigItem::default(),
            },
            last_change: None,
        };
        cfg.save()?;
        Ok(cfg)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    pub fn pixels_per_hour(&self) -> f64 {
        *self.data.pixels_per_hour.get_value()
    }
    pub fn grid_scale(&self) -> GridScale {
        self.data.pixels_per_hour.scale().unwrap_or_default()
    }
    pub fn week_start(&self) -> WeekStart {
        *self.data.week_start.get_value()
    }
    pub fn default_view(&self) -> ViewKind {
        *self.data.default_view.get_value()
    }
    pub fn default_duration(&self) -> i64 {
        *self.data.default_duration.get_value()
    }
    pub fn drop_date_policy(&self) -> DropDatePolicy {
        *self.data.drop_date_policy.get_value()
    }
    pub fn log_level(&self) -> LogLevel {
        *self.data.log_level.get_value()
    }
    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    fn item(&self, key: ConfigKey) -> (&str, String) {
        let d = &self.data;
        match key {
            ConfigKey::PixelsPerHour => (
                d.pixels_per_hour.description(),
                d.pixels_per_hour.get_value().to_string(),
            ),
            ConfigKey::WeekStart => (
                d.week_start.description(),
                d.week_start.get_value().to_string(),
            ),
            ConfigKey::DefaultView => (
                d.default_view.description(),
                d.default_view.get_value().to_string(),
            ),
            ConfigKey::DefaultDuration => (
                d.default_duration.description(),
                d.default_duration.get_value().to_string(),
            ),
            ConfigKey::DropDatePolicy => (
                d.drop_date_policy.description(),
                d.drop_date_policy.get_value().to_string(),
            ),
            ConfigKey::LogLevel => (
                d.log_level.description(),
                d.log_level.get_value().as_ref().to_string(),
            ),
            ConfigKey::FileLoggingEnabled => (
                d.file_logging_enabled.description(),
                d.file_logging_enabled.get_value().to_string(),
            ),
        }
    }

    pub fn value_of(&self, key: ConfigKey) -> String {
        self.item(key).1
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    let (description, value) = self.item(key);
                    (key.to_string(), description.to_string(), value)
                })
                .collect(),
        )
    }

    pub fn set_by_index(&mut self, index: usize, new_value: &str) -> Result<()> {
        let key = ConfigKey::iter()
            .nth(index)
            .ok_or_else(|| Error::Parse(format!("Invalid ID: {index}")))?;
        self.set_key(key, new_value)
    }

    /// Validate, apply and persist one item. On failure neither memory nor
    /// the file changes.
    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        let mut next = self.data.clone();
        match key {
            ConfigKey::PixelsPerHour => next.pixels_per_hour.set_value(new_value)?,
            ConfigKey::WeekStart => next.week_start.set_value(new_value)?,
            ConfigKey::DefaultView => next.default_view.set_value(new_value)?,
            ConfigKey::DefaultDuration => next.default_duration.set_value(new_value)?,
            ConfigKey::DropDatePolicy => next.drop_date_policy.set_value(new_value)?,
            ConfigKey::LogLevel => next.log_level.set_value(new_value)?,
            ConfigKey::FileLoggingEnabled => next.file_logging_enabled.set_value(new_value)?,
        }
        Self::write(&self.path, &next)?;
        self.data = next;
        self.last_change = Some((key.to_string(), old, self.value_of(key)));
        Ok(())
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::try_from(key_str)?;
        self.set_key(key, new_value)
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    fn save(&self) -> Result<()> {
        Self::write(&self.path, &self.data)
    }

    fn write(path: &Path, data: &ConfigFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)
            .map_err(|e| Error::config(format!("Failed to encode config: {}", e)))?;
        fs::write(path, json)
            .map_err(|e| Error::config(format!("Failed to write {}: {}", path.display(), e)))
    }
}
