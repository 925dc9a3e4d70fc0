use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;
use crate::extensions::string::ToDashSeparators;
use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

// ---------------------------------------------------------------------------
// Command words
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    Slots,
    Stats,
    Filter,
    Config,
    Log,
    Save,
    Read,
    Man,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported global command: '{}'. Valid global commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum BlockCommand {
    Add,
    #[strum(serialize = "mod", to_string = "mod")]
    Modify,
    #[strum(serialize = "del", to_string = "del")]
    Delete,
    Move,
    Resize,
    Place,
    Select,
    Sync,
}

impl BlockCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported block command: '{}'. Valid block commands: {}",
                s.trim(),
                valid_csv::<BlockCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ViewCommand {
    View,
    Next,
    Prev,
    Today,
    Pick,
    Show,
}

impl ViewCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported view command: '{}'. Valid view commands: {}",
                s.trim(),
                valid_csv::<ViewCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TypeHelpCommand {
    Date,
    Time,
    Colors,
}

impl TypeHelpCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Unsupported type help command: '{}'. Valid type help commands: {}",
                s.trim(),
                valid_csv::<TypeHelpCommand>()
            ))
        })
    }

    pub fn usage(&self) -> String {
        match self {
            TypeHelpCommand::Date => Date::usage(),
            TypeHelpCommand::Time => ClockTime::usage(),
            TypeHelpCommand::Colors => BlockColor::usage(),
        }
    }
}

// ---------------------------------------------------------------------------
// Block attributes
// ---------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BlockStatus {
    Pending,
    InProgress,
    Completed,
}

impl BlockStatus {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid status: '{}'. Valid statuses: {}",
                s.trim(),
                valid_csv::<BlockStatus>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid priority: '{}'. Valid priorities: {}",
                s.trim(),
                valid_csv::<Priority>()
            ))
        })
    }
}

/// Which edge of a block a resize gesture drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ResizeEdge {
    Start,
    End,
}

impl ResizeEdge {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid resize edge: '{}'. Valid edges: {}",
                s.trim(),
                valid_csv::<ResizeEdge>()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// View / calendar settings
// ---------------------------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    Day,
    Week,
    Month,
}

impl ViewKind {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid view: '{}'. Valid views: {}",
                s.trim(),
                valid_csv::<ViewKind>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
    Saturday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Saturday => Weekday::Sat,
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid week start: '{}'. Allowed values: {}",
                s.trim(),
                valid_csv::<WeekStart>()
            ))
        })
    }
}

/// Which calendar day a drag-and-drop lands on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DropDatePolicy {
    Today,
    Column,
}

impl DropDatePolicy {
    pub fn help(&self) -> &'static str {
        match self {
            DropDatePolicy::Today => "Dropped blocks land on today's date at the target hour.",
            DropDatePolicy::Column => "Dropped blocks land on the date of the target column.",
        }
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid drop date policy: '{}'. Allowed policies: {}",
                s.trim(),
                valid_csv::<DropDatePolicy>()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Dates and times of day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d", to_string = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y", to_string = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%Y/%m/%d", to_string = "%Y/%m/%d")]
    YmdSlash,
    #[strum(serialize = "%m/%d/%Y", to_string = "%m/%d/%Y")]
    MdYSlash,
    #[strum(serialize = "%m-%d", to_string = "%m-%d")]
    MdDash,
    #[strum(serialize = "%m/%d", to_string = "%m/%d")]
    MdSlash,
}

#[derive(Debug, Clone)]
struct DateParseSpec {
    input: String,
    date_format: DateFormat,
}

impl DateFormat {
    fn build_parse_spec(self, input: &str) -> DateParseSpec {
        let current_year = Local::now().date_naive().year();
        match self {
            DateFormat::YmdDash | DateFormat::YmdSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::YmdDash,
            },
            DateFormat::MdYDash | DateFormat::MdYSlash => DateParseSpec {
                input: input.to_owned(),
                date_format: DateFormat::MdYDash,
            },
            DateFormat::MdDash | DateFormat::MdSlash => DateParseSpec {
                input: format!("{current_year}-{input}"),
                date_format: DateFormat::YmdDash,
            },
        }
    }
}

impl Date {
    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    fn error_message(input: &str) -> String {
        format!("Invalid date format: '{}'. {}", input, Self::usage())
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();
        // Bare numbers are hours, pixels or ids, never dates.
        if !input.contains('-') {
            return Err(Error::Parse(Self::error_message(&input)));
        }

        for f in DateFormat::iter() {
            let spec = f.build_parse_spec(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&spec.input, spec.date_format.as_ref()) {
                if !(1..=9999).contains(&date.year()) {
                    return Err(Error::Parse(format!(
                        "Date {date} is out of range; years run from 1 to 9999."
                    )));
                }
                return Ok(Date(date));
            }
        }

        Err(Error::Parse(Self::error_message(&input)))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A wall-clock time of day, such as `9:30`, `14:00` or `2:15PM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime(pub NaiveTime);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
pub enum TimeFormat {
    #[strum(serialize = "%I:%M%p")]
    HmMeridian,
    #[strum(serialize = "%H:%M")]
    Hm24,
}

impl TimeFormat {
    fn token_has_meridian(token: &str) -> bool {
        token.ends_with("AM") || token.ends_with("PM")
    }

    /// `9PM` becomes `9:00PM` so every candidate carries minutes.
    fn ensure_minutes(token: String) -> String {
        if token.contains(':') {
            return token;
        }
        let mut token = token;
        let idx = token.len().saturating_sub(2);
        token.insert_str(idx, ":00");
        token
    }

    fn normalize(self, raw: &str) -> Option<String> {
        let token = raw.trim().to_ascii_uppercase();
        match self {
            TimeFormat::HmMeridian if Self::token_has_meridian(&token) => {
                Some(Self::ensure_minutes(token))
            }
            TimeFormat::Hm24 if !Self::token_has_meridian(&token) && token.contains(':') => {
                Some(token)
            }
            _ => None,
        }
    }
}

impl ClockTime {
    pub fn try_from_str(raw: &str) -> Result<Self> {
        for f in TimeFormat::iter() {
            let Some(input) = f.normalize(raw) else {
                continue;
            };
            if let Ok(t) = NaiveTime::parse_from_str(&input, f.as_ref()) {
                return Ok(ClockTime(t));
            }
        }
        Err(Error::Parse(Self::error_message(raw)))
    }

    pub fn usage() -> String {
        let now = Local::now().time();
        let sample = now - chrono::Duration::seconds(now.second() as i64);
        format!(
            "Supported formats: {}, {}, {}",
            sample.format("%-I:%M%p"),
            sample.format("%-I%p"),
            sample.format("%H:%M")
        )
    }

    fn error_message(input: &str) -> String {
        format!("Invalid time format: '{}'. {}", input.trim(), Self::usage())
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

// ---------------------------------------------------------------------------
// Booleans (config values)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Display palette; each entry doubles as an external calendar color id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlockColor {
    Indigo,
    Sage,
    Grape,
    Flamingo,
    Banana,
    Tangerine,
    Peacock,
    Graphite,
    Blueberry,
    Basil,
    Tomato,
}

impl BlockColor {
    pub const RESET: &'static str = crate::csi!("0m");

    pub fn hex(self) -> &'static str {
        match self {
            BlockColor::Indigo => "#4f46e5",
            BlockColor::Sage => "#33b679",
            BlockColor::Grape => "#8e24aa",
            BlockColor::Flamingo => "#e67c73",
            BlockColor::Banana => "#f6bf26",
            BlockColor::Tangerine => "#f4511e",
            BlockColor::Peacock => "#039be5",
            BlockColor::Graphite => "#616161",
            BlockColor::Blueberry => "#3f51b5",
            BlockColor::Basil => "#0b8043",
            BlockColor::Tomato => "#d50000",
        }
    }

    /// Event color id understood by the external calendar ("1".."11").
    pub fn calendar_color_id(self) -> &'static str {
        match self {
            BlockColor::Indigo => "1",
            BlockColor::Sage => "2",
            BlockColor::Grape => "3",
            BlockColor::Flamingo => "4",
            BlockColor::Banana => "5",
            BlockColor::Tangerine => "6",
            BlockColor::Peacock => "7",
            BlockColor::Graphite => "8",
            BlockColor::Blueberry => "9",
            BlockColor::Basil => "10",
            BlockColor::Tomato => "11",
        }
    }

    pub fn from_calendar_color_id(id: &str) -> Option<Self> {
        Self::iter().find(|c| c.calendar_color_id() == id.trim())
    }

    /// Foreground ANSI color for this palette entry.
    pub fn ansi_fg(self) -> &'static str {
        match self {
            BlockColor::Indigo => crate::csi!("38;5;62m"),
            BlockColor::Sage => crate::csi!("38;5;72m"),
            BlockColor::Grape => crate::csi!("38;5;91m"),
            BlockColor::Flamingo => crate::csi!("38;5;174m"),
            BlockColor::Banana => crate::csi!("38;5;220m"),
            BlockColor::Tangerine => crate::csi!("38;5;202m"),
            BlockColor::Peacock => crate::csi!("38;5;32m"),
            BlockColor::Graphite => crate::csi!("38;5;241m"),
            BlockColor::Blueberry => crate::csi!("38;5;61m"),
            BlockColor::Basil => crate::csi!("38;5;28m"),
            BlockColor::Tomato => crate::csi!("38;5;160m"),
        }
    }

    pub fn paint<S: AsRef<str>>(self, s: S) -> String {
        format!("{}{}{}", self.ansi_fg(), s.as_ref(), Self::RESET)
    }

    pub fn usage() -> String {
        let colors = BlockColor::iter()
            .map(|c| format!("{} ({}, #{})", c, c.hex(), c.calendar_color_id()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Categories '1'-'11' use the matching color; other names get a stable color. Palette: {}",
            colors
        )
    }

    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid value for color: '{}'. Valid colors: {}",
                s.trim(),
                valid_csv::<BlockColor>()
            ))
        })
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    #[strum(serialize = "-h", serialize = "-help", to_string = "-h")]
    Help,
}

impl Flag {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::Parse(format!(
                "Invalid flag: '{}'. Valid flags: {}",
                s.trim(),
                valid_csv::<Flag>()
            ))
        })
    }
}
