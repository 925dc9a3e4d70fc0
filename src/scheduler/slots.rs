use crate::core::models::{TimeBlock, TimeSlot};
use crate::extensions::chrono::NaiveDateExt;
use chrono::{Duration, NaiveDate, NaiveDateTime};

pub const SLOT_MINUTES: i64 = 30;

/// Free/busy view of one day. Only blocks lying entirely inside the day
/// take part; slots are produced lazily on each `iter()`.
#[derive(Debug, Clone)]
pub struct DaySlots<'a> {
    date: NaiveDate,
    day_start: NaiveDateTime,
    day_end: NaiveDateTime,
    busy: Vec<&'a TimeBlock>,
}

impl<'a> DaySlots<'a> {
    pub fn new<I>(blocks: I, date: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a TimeBlock>,
    {
        let day_start = date.day_start();
        let day_end = date.day_end();
        let busy = blocks
            .into_iter()
            .filter(|b| b.start_time >= day_start && b.end_time <= day_end)
            .collect();
        Self {
            date,
            day_start,
            day_end,
            busy,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Blocks that fall inside the day.
    pub fn blocks(&self) -> &[&'a TimeBlock] {
        &self.busy
    }

    pub fn iter(&self) -> SlotIter<'_, 'a> {
        SlotIter {
            cursor: self.day_start,
            day_end: self.day_end,
            busy: &self.busy,
        }
    }

    pub fn available_count(&self) -> usize {
        self.iter().filter(|s| s.is_available).count()
    }
}

impl<'s, 'a> IntoIterator for &'s DaySlots<'a> {
    type Item = TimeSlot;
    type IntoIter = SlotIter<'s, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SlotIter<'s, 'a> {
    cursor: NaiveDateTime,
    day_end: NaiveDateTime,
    busy: &'s [&'a TimeBlock],
}

impl Iterator for SlotIter<'_, '_> {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        if self.cursor >= self.day_end {
            return None;
        }
        let start_time = self.cursor;
        let end_time = start_time + Duration::minutes(SLOT_MINUTES);
        let is_available = !self.busy.iter().any(|b| b.intersects(start_time, end_time));
        self.cursor = end_time;
        Some(TimeSlot {
            start_time,
            end_time,
            is_available,
        })
    }
}
