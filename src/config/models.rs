use crate::core::models::{MAX_BLOCK_MINUTES, MIN_BLOCK_MINUTES};
use crate::core::types::{Bool, DropDatePolicy, ViewKind, WeekStart};
use crate::errors::Error;
use crate::logging::LogLevel;
use crate::scheduler::pointer::{DEFAULT_PIXELS_PER_HOUR, GridScale};
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PixelsPerHourConfigItem {
    pub value: f64,
    pub description: String,
}

impl Default for PixelsPerHourConfigItem {
    fn default() -> Self {
        Self {
            value: DEFAULT_PIXELS_PER_HOUR,
            description: "Height of one hour row in pixels.".into(),
        }
    }
}

impl PixelsPerHourConfigItem {
    pub fn scale(&self) -> Result<GridScale, Error> {
        GridScale::new(self.value)
    }
}

impl ConfigItem<f64> for PixelsPerHourConfigItem {
    fn get_value(&self) -> &f64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let parsed: f64 = new_value.trim().parse().map_err(|_| {
            Error::Parse(format!(
                "Invalid pixels per hour: '{}'. Expected a positive number.",
                new_value.trim()
            ))
        })?;
        self.value = GridScale::new(parsed)?.pixels_per_hour();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekStartConfigItem {
    pub value: WeekStart,
    pub description: String,
}
impl ConfigItem<WeekStart> for WeekStartConfigItem {
    fn get_value(&self) -> &WeekStart {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = WeekStart::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultViewConfigItem {
    pub value: ViewKind,
    pub description: String,
}

impl Default for DefaultViewConfigItem {
    fn default() -> Self {
        Self {
            value: ViewKind::Day,
            description: "View shown when a session starts.".into(),
        }
    }
}

impl ConfigItem<ViewKind> for DefaultViewConfigItem {
    fn get_value(&self) -> &ViewKind {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = ViewKind::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultDurationConfigItem {
    pub value: i64,
    pub description: String,
}

impl Default for DefaultDurationConfigItem {
    fn default() -> Self {
        Self {
            value: 60,
            description: "Minutes given to new blocks when no duration is entered.".into(),
        }
    }
}

impl DefaultDurationConfigItem {
    pub fn check(minutes: i64) -> Result<i64, Error> {
        if minutes < MIN_BLOCK_MINUTES {
            return Err(Error::validation(format!(
                "Default duration must be at least {MIN_BLOCK_MINUTES} minutes (got {minutes})."
            )));
        }
        if minutes > MAX_BLOCK_MINUTES {
            return Err(Error::validation(format!(
                "Default duration must be at most {MAX_BLOCK_MINUTES} minutes (got {minutes})."
            )));
        }
        Ok(minutes)
    }
}

impl ConfigItem<i64> for DefaultDurationConfigItem {
    fn get_value(&self) -> &i64 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let parsed: i64 = new_value.trim().parse().map_err(|_| {
            Error::Parse(format!(
                "Invalid duration: '{}'. Expected whole minutes.",
                new_value.trim()
            ))
        })?;
        self.value = Self::check(parsed)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropDatePolicyConfigItem {
    pub value: DropDatePolicy,
    pub description: String,
}

impl Default for DropDatePolicyConfigItem {
    fn default() -> Self {
        Self {
            value: DropDatePolicy::Today,
            description: "Date used when a block is dropped on the grid.".into(),
        }
    }
}

impl ConfigItem<DropDatePolicy> for DropDatePolicyConfigItem {
    fn get_value(&self) -> &DropDatePolicy {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = DropDatePolicy::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLevelConfigItem {
    pub value: LogLevel,
    pub description: String,
}

impl Default for LogLevelConfigItem {
    fn default() -> Self {
        Self {
            value: LogLevel::Info,
            description: "Lowest severity that gets logged.".into(),
        }
    }
}

impl ConfigItem<LogLevel> for LogLevelConfigItem {
    fn get_value(&self) -> &LogLevel {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = LogLevel::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
