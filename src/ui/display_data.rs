use crate::core::models::{BlockId, TimeBlock};
use crate::core::types::{BlockStatus, Priority, WeekStart};
use crate::extensions::chrono::NaiveDateExt;
use crate::scheduler::analytics::{AnalyticsReport, Distribution};
use crate::scheduler::calendar_view::{CurrentTimeMarker, ViewState};
use crate::scheduler::pointer::GridScale;
use crate::scheduler::slots::DaySlots;
use crate::ui::width_util::WidthUtil;
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use std::fmt::Display;
use strum::IntoEnumIterator;

const TITLE_MAX: usize = 32;
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct ScheduleSection {
    pub title: String,
    pub rows: Vec<Vec<String>>, // ordered by start time
    /// Current-time line when the section's day is today.
    pub marker: Option<String>,
}

/// Everything `show` needs to draw the current view.
#[derive(Debug, Clone)]
pub struct GridFrame<'a> {
    pub view: &'a ViewState,
    pub blocks: Vec<&'a TimeBlock>,
    pub selected: Option<BlockId>,
    pub marker: &'a CurrentTimeMarker,
    pub scale: GridScale,
    pub today: NaiveDate,
}

#[derive(Debug, Default, Clone)]
pub struct DisplayDataBuilder {
    util: WidthUtil,
}

impl DisplayDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_rows(&self, blocks: &[&TimeBlock], selected: Option<BlockId>) -> Vec<Vec<String>> {
        blocks
            .iter()
            .map(|b| {
                let tags = if b.tags.is_empty() {
                    "-".to_string()
                } else {
                    b.tags.iter().map(|t| format!("+{t}")).collect::<Vec<_>>().join(" ")
                };
                let cells = [
                    id_cell(b, selected),
                    self.util.truncate(&b.title, TITLE_MAX),
                    b.start_time.format("%Y-%m-%d").to_string(),
                    time_span(b),
                    b.duration_minutes().to_string(),
                    b.status.to_string(),
                    b.priority.to_string(),
                    format!("#{}", b.category),
                    tags,
                ];
                cells.iter().map(|c| b.color.paint(c)).collect()
            })
            .collect()
    }

    /// One section per day holding the blocks that start on it, with their
    /// pixel position on the hour grid.
    pub fn day_sections(&self, days: &[NaiveDate], frame: &GridFrame<'_>) -> Vec<ScheduleSection> {
        days.iter()
            .map(|date| {
                let mut on_day: Vec<&TimeBlock> = frame
                    .blocks
                    .iter()
                    .copied()
                    .filter(|b| b.starts_on(*date))
                    .collect();
                on_day.sort_by_key(|b| (b.start_time, b.id));

                let rows = on_day
                    .iter()
                    .map(|b| {
                        let top = (b.start_time - date.day_start()).num_minutes();
                        let cells = [
                            id_cell(b, frame.selected),
                            time_span(b),
                            self.util.truncate(&b.title, TITLE_MAX),
                            b.status.to_string(),
                            format!("{:.0}", frame.scale.pixels_for_minutes(top)),
                            format!("{:.0}", frame.scale.pixels_for_minutes(b.duration_minutes())),
                        ];
                        cells.iter().map(|c| b.color.paint(c)).collect()
                    })
                    .collect();

                let marker = frame.marker.is_on(*date).then(|| {
                    format!(
                        "Now {} ({:.0}px)",
                        frame.marker.label(),
                        frame.marker.position_px(frame.scale)
                    )
                });
                let mut title = date.format("%a %Y-%m-%d").to_string();
                if *date == frame.today {
                    title.push_str(" (today)");
                }
                ScheduleSection { title, rows, marker }
            })
            .collect()
    }

    pub fn weekday_headers(&self, first: WeekStart) -> Vec<String> {
        let start = first.weekday();
        (0..7)
            .map(|i| {
                let mut d = start;
                for _ in 0..i {
                    d = d.succ();
                }
                d.to_string()
            })
            .collect()
    }

    /// Calendar weeks of the focus month. Each cell reads `day(count)`;
    /// the selected day is bracketed and today is starred.
    pub fn month_rows(&self, frame: &GridFrame<'_>) -> Vec<Vec<String>> {
        let view = frame.view;
        let first = view.current_date().month_start();
        let days = first.days_in_month() as i64;
        let grid_start = first.week_start(view.week_start());
        let last = first + Duration::days(days - 1);

        let mut rows = Vec::new();
        let mut cursor = grid_start;
        while cursor <= last {
            let mut row = Vec::with_capacity(7);
            for _ in 0..7 {
                row.push(if cursor.month() == first.month() && cursor.year() == first.year() {
                    self.month_cell(cursor, frame)
                } else {
                    String::new()
                });
                cursor += Duration::days(1);
            }
            rows.push(row);
        }
        rows
    }

    fn month_cell(&self, date: NaiveDate, frame: &GridFrame<'_>) -> String {
        let count = frame.blocks.iter().filter(|b| b.starts_on(date)).count();
        let mut cell = if count > 0 {
            format!("{}({count})", date.day())
        } else {
            date.day().to_string()
        };
        if date == frame.view.selected_date() {
            cell = format!("[{cell}]");
        }
        if date == frame.today {
            cell.push('*');
        }
        cell
    }

    pub fn slot_rows(&self, slots: &DaySlots<'_>) -> Vec<Vec<String>> {
        slots
            .iter()
            .map(|slot| {
                let span = format!(
                    "{}-{}",
                    slot.start_time.format("%H:%M"),
                    slot.end_time.format("%H:%M")
                );
                if slot.is_available {
                    return vec![span, "free".to_string(), "-".to_string()];
                }
                let titles = slots
                    .blocks()
                    .iter()
                    .filter(|b| b.intersects(slot.start_time, slot.end_time))
                    .map(|b| b.color.paint(self.util.truncate(&b.title, TITLE_MAX)))
                    .collect::<Vec<_>>()
                    .join(", ");
                vec![span, "busy".to_string(), titles]
            })
            .collect()
    }

    pub fn stats_rows(&self, report: &AnalyticsReport) -> Vec<Vec<String>> {
        vec![
            vec!["Total blocks".into(), report.total_blocks.to_string()],
            vec!["Total hours".into(), report.total_hours.to_string()],
            vec!["Completion rate".into(), format!("{}%", report.completion_rate)],
            vec!["Blocks today".into(), report.today_blocks.to_string()],
            vec!["Blocks this week".into(), report.week_blocks.to_string()],
            vec!["Hours this week".into(), report.week_hours.to_string()],
        ]
    }

    pub fn status_rows(&self, dist: &Distribution<BlockStatus>) -> Vec<Vec<String>> {
        self.distribution_rows(dist, BlockStatus::iter())
    }

    pub fn priority_rows(&self, dist: &Distribution<Priority>) -> Vec<Vec<String>> {
        self.distribution_rows(dist, Priority::iter())
    }

    fn distribution_rows<K, I>(&self, dist: &Distribution<K>, keys: I) -> Vec<Vec<String>>
    where
        K: Copy + PartialEq + Display,
        I: Iterator<Item = K>,
    {
        keys.map(|k| {
            let pct = dist.percent(k);
            vec![
                k.to_string(),
                dist.count(k).to_string(),
                format!("{pct}%"),
                bar(pct),
            ]
        })
        .collect()
    }
}

/// Whole-block bar of `BAR_WIDTH` cells for a percentage.
fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("{}{}", "█".repeat(filled), "·".repeat(BAR_WIDTH - filled))
}

fn id_cell(b: &TimeBlock, selected: Option<BlockId>) -> String {
    if selected == Some(b.id) {
        format!("*{}", b.id)
    } else {
        b.id.to_string()
    }
}

fn time_span(b: &TimeBlock) -> String {
    let ends_at_midnight = b.end_time.date() != b.start_time.date()
        && b.end_time.time().num_seconds_from_midnight() == 0;
    let end = if ends_at_midnight {
        "24:00".to_string()
    } else {
        b.end_time.format("%H:%M").to_string()
    };
    format!("{}-{}", b.start_time.format("%H:%M"), end)
}
