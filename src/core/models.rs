use crate::core::types::{BlockColor, BlockStatus, Priority};
use crate::errors::{Error, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use strum::IntoEnumIterator;

/// Shortest block the engine accepts, in minutes.
pub const MIN_BLOCK_MINUTES: i64 = 15;
/// Longest block the engine accepts: one week.
pub const MAX_BLOCK_MINUTES: i64 = 7 * 24 * 60;

pub const DEFAULT_BLOCK_TITLE: &str = "New Block";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ========
// Category
// ========

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(Error::validation("Category name cannot be empty."));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numbered categories use the palette entry with that calendar id;
    /// named categories hash onto the palette.
    pub fn color(&self) -> BlockColor {
        if let Some(c) = BlockColor::from_calendar_color_id(&self.0) {
            return c;
        }
        let palette: Vec<BlockColor> = BlockColor::iter().collect();
        let hash = self
            .0
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        palette[hash as usize % palette.len()]
    }
}

impl Default for Category {
    fn default() -> Self {
        Self("1".to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========
// TimeBlock
// =========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub id: BlockId,
    pub title: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BlockStatus,
    pub priority: Priority,
    pub category: Category,
    pub color: BlockColor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl TimeBlock {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    pub fn hours(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 3_600_000.0
    }

    /// Same block with a new time range; id and attributes are kept.
    pub fn with_times(&self, start_time: NaiveDateTime, end_time: NaiveDateTime) -> Self {
        Self {
            start_time,
            end_time,
            ..self.clone()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.color = category.color();
        self.category = category;
        self
    }

    /// Half-open interval intersection with `[start, end)`.
    pub fn intersects(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start_time < end && self.end_time > start
    }

    pub fn starts_on(&self, date: NaiveDate) -> bool {
        self.start_time.date() == date
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_range(self.start_time, self.end_time)
    }
}

impl fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TimeBlock(id={}, title='{}', start={}, end={}, status={}, priority={}, category={})",
            self.id,
            self.title,
            self.start_time.format("%Y-%m-%d %H:%M"),
            self.end_time.format("%Y-%m-%d %H:%M"),
            self.status,
            self.priority,
            self.category
        )
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::validation("Title is required."));
    }
    Ok(())
}

pub(crate) fn validate_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
    if end <= start {
        return Err(Error::validation(format!(
            "End time {} must be after start time {}.",
            end.format("%Y-%m-%d %H:%M"),
            start.format("%Y-%m-%d %H:%M")
        )));
    }
    check_duration((end - start).num_minutes())
}

pub(crate) fn check_duration(minutes: i64) -> Result<()> {
    if minutes < MIN_BLOCK_MINUTES {
        return Err(Error::validation(format!(
            "Duration must be at least {MIN_BLOCK_MINUTES} minutes (got {minutes})."
        )));
    }
    if minutes > MAX_BLOCK_MINUTES {
        return Err(Error::validation(format!(
            "Duration must be at most {MAX_BLOCK_MINUTES} minutes (got {minutes})."
        )));
    }
    Ok(())
}

/// `start + minutes`, or a validation error when the result is out of range.
pub(crate) fn checked_end(start: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime> {
    Duration::try_minutes(minutes)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or_else(|| {
            Error::validation(format!(
                "A block of {minutes} minutes from {} is out of range.",
                start.format("%Y-%m-%d %H:%M")
            ))
        })
}

// ==============
// TimeBlockDraft
// ==============

/// Everything a new block needs except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeBlockDraft {
    pub title: String,
    pub start_time: NaiveDateTime,
    pub duration_minutes: i64,
    pub description: Option<String>,
    pub status: BlockStatus,
    pub priority: Priority,
    pub category: Category,
    pub tags: Vec<String>,
}

impl TimeBlockDraft {
    pub fn new(title: impl Into<String>, start_time: NaiveDateTime, duration_minutes: i64) -> Self {
        Self {
            title: title.into(),
            start_time,
            duration_minutes,
            description: None,
            status: BlockStatus::Pending,
            priority: Priority::Medium,
            category: Category::default(),
            tags: Vec::new(),
        }
    }

    /// Default block created by clicking an empty slot.
    pub fn for_slot(slot: &TimeSlot, duration_minutes: i64) -> Self {
        Self::new(DEFAULT_BLOCK_TITLE, slot.start_time, duration_minutes)
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn with_status(mut self, status: BlockStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn end_time(&self) -> Result<NaiveDateTime> {
        checked_end(self.start_time, self.duration_minutes)
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        check_duration(self.duration_minutes)?;
        self.end_time().map(|_| ())
    }

    pub(crate) fn into_block(self, id: BlockId) -> Result<TimeBlock> {
        let end_time = self.end_time()?;
        Ok(TimeBlock {
            id,
            title: self.title.trim().to_string(),
            start_time: self.start_time,
            end_time,
            status: self.status,
            priority: self.priority,
            color: self.category.color(),
            category: self.category,
            description: self.description,
            tags: self.tags,
        })
    }
}

// ========
// TimeSlot
// ========

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub is_available: bool,
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M"),
            if self.is_available { "free" } else { "busy" }
        )
    }
}

// ======
// Filter
// ======

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::validation(format!(
                "Date range end {end} is before its start {start}."
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockFilter {
    pub categories: BTreeSet<Category>,
    pub date_range: Option<DateRange>,
    pub statuses: Vec<BlockStatus>,
    pub tags: BTreeSet<String>,
}

impl Default for BlockFilter {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            date_range: None,
            statuses: vec![BlockStatus::Pending, BlockStatus::InProgress],
            tags: BTreeSet::new(),
        }
    }
}

/// Partial filter; `Some` fields replace the current value wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPatch {
    pub categories: Option<BTreeSet<Category>>,
    pub date_range: Option<Option<DateRange>>,
    pub statuses: Option<Vec<BlockStatus>>,
    pub tags: Option<BTreeSet<String>>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        self.categories.is_none()
            && self.date_range.is_none()
            && self.statuses.is_none()
            && self.tags.is_none()
    }
}

impl BlockFilter {
    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(date_range) = patch.date_range {
            self.date_range = date_range;
        }
        if let Some(statuses) = patch.statuses {
            self.statuses = statuses;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Empty sets never restrict.
    pub fn matches(&self, block: &TimeBlock) -> bool {
        let status_ok = self.statuses.is_empty() || self.statuses.contains(&block.status);
        let category_ok = self.categories.is_empty() || self.categories.contains(&block.category);
        let tags_ok = self.tags.is_empty() || block.tags.iter().any(|t| self.tags.contains(t));
        let range_ok = self
            .date_range
            .map(|r| r.contains(block.start_time.date()))
            .unwrap_or(true);
        status_ok && category_ok && tags_ok && range_ok
    }
}

impl fmt::Display for BlockFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn any_or<I: Iterator<Item = String>>(items: I) -> String {
            let v: Vec<String> = items.collect();
            if v.is_empty() { "any".into() } else { v.join(", ") }
        }
        write!(
            f,
            "statuses=[{}] categories=[{}] tags=[{}] dates={}",
            any_or(self.statuses.iter().map(|s| s.to_string())),
            any_or(self.categories.iter().map(|c| c.to_string())),
            any_or(self.tags.iter().cloned()),
            self.date_range
                .map(|r| r.to_string())
                .unwrap_or_else(|| "any".into())
        )
    }
}
