use crate::core::models::TimeBlock;
use crate::core::types::{BlockStatus, Priority, WeekStart};
use crate::extensions::chrono::NaiveDateExt;
use chrono::NaiveDate;
use strum::IntoEnumIterator;

/// Per-variant counts plus their grand total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<K> {
    pub counts: Vec<(K, usize)>,
    pub total: usize,
}

impl<K: Copy + PartialEq> Distribution<K> {
    pub fn count(&self, key: K) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    /// Share of `key` in whole percent; 0 for an empty distribution.
    pub fn percent(&self, key: K) -> u32 {
        if self.total == 0 {
            return 0;
        }
        round_half_up(self.count(key) as f64 / self.total as f64 * 100.0) as u32
    }
}

fn distribution<'a, K, I, F>(blocks: I, key_of: F) -> Distribution<K>
where
    K: IntoEnumIterator + Copy + PartialEq,
    I: IntoIterator<Item = &'a TimeBlock>,
    F: Fn(&TimeBlock) -> K,
{
    let mut counts: Vec<(K, usize)> = K::iter().map(|k| (k, 0)).collect();
    let mut total = 0;
    for block in blocks {
        let key = key_of(block);
        if let Some(entry) = counts.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += 1;
        }
        total += 1;
    }
    Distribution { counts, total }
}

fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

pub fn total_hours<'a, I: IntoIterator<Item = &'a TimeBlock>>(blocks: I) -> i64 {
    let hours: f64 = blocks.into_iter().map(|b| b.hours()).sum();
    round_half_up(hours) as i64
}

pub fn completion_rate(blocks: &[TimeBlock]) -> u32 {
    status_distribution(blocks).percent(BlockStatus::Completed)
}

pub fn status_distribution<'a, I: IntoIterator<Item = &'a TimeBlock>>(
    blocks: I,
) -> Distribution<BlockStatus> {
    distribution(blocks, |b| b.status)
}

pub fn priority_distribution<'a, I: IntoIterator<Item = &'a TimeBlock>>(
    blocks: I,
) -> Distribution<Priority> {
    distribution(blocks, |b| b.priority)
}

/// Blocks starting anywhere in the calendar week containing `today`.
pub fn weekly_blocks(blocks: &[TimeBlock], today: NaiveDate, first: WeekStart) -> Vec<&TimeBlock> {
    let start = today.week_start(first).day_start();
    let end = today.week_end(first).day_end();
    blocks
        .iter()
        .filter(|b| start <= b.start_time && b.start_time <= end)
        .collect()
}

pub fn daily_blocks(blocks: &[TimeBlock], today: NaiveDate) -> Vec<&TimeBlock> {
    let start = today.day_start();
    let end = today.day_end();
    blocks
        .iter()
        .filter(|b| start <= b.start_time && b.start_time <= end)
        .collect()
}

/// Read-only rollup over the full collection, rebuilt on every call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    pub total_blocks: usize,
    pub total_hours: i64,
    pub completion_rate: u32,
    pub today_blocks: usize,
    pub week_blocks: usize,
    pub week_hours: i64,
    pub statuses: Distribution<BlockStatus>,
    pub priorities: Distribution<Priority>,
}

impl AnalyticsReport {
    pub fn build(blocks: &[TimeBlock], today: NaiveDate, first: WeekStart) -> Self {
        let week = weekly_blocks(blocks, today, first);
        Self {
            total_blocks: blocks.len(),
            total_hours: total_hours(blocks),
            completion_rate: completion_rate(blocks),
            today_blocks: daily_blocks(blocks, today).len(),
            week_blocks: week.len(),
            week_hours: total_hours(week.iter().copied()),
            statuses: status_distribution(blocks),
            priorities: priority_distribution(blocks),
        }
    }
}
