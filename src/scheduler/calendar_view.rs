use crate::core::types::{ViewKind, WeekStart};
use crate::extensions::chrono::{NaiveDateExt, NaiveDateTimeExt};
use crate::scheduler::pointer::GridScale;
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Ordered run of consecutive dates.
pub struct CalendarView {
    start: NaiveDate,
    days: u32,
}

impl CalendarView {
    pub fn new(start: NaiveDate) -> Self {
        Self { start, days: 1 }
    }

    pub fn with_start_date(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        (0..self.days)
            .map(|offset| self.start + Duration::days(offset as i64))
            .collect()
    }
}

/// Active granularity plus the anchor and drill-down dates.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    current_view: ViewKind,
    current_date: NaiveDate,
    selected_date: NaiveDate,
    week_start: WeekStart,
}

impl ViewState {
    pub fn new(view: ViewKind, today: NaiveDate, week_start: WeekStart) -> Self {
        Self {
            current_view: view,
            current_date: today,
            selected_date: today,
            week_start,
        }
    }

    pub fn current_view(&self) -> ViewKind {
        self.current_view
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn set_week_start(&mut self, week_start: WeekStart) {
        self.week_start = week_start;
    }

    pub fn set_view(&mut self, view: ViewKind) {
        self.current_view = view;
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, dir: i32) {
        self.current_date = match self.current_view {
            ViewKind::Day => self.current_date + Duration::days(dir as i64),
            ViewKind::Week => self.current_date + Duration::weeks(dir as i64),
            ViewKind::Month => self.current_date.shift_months(dir),
        };
    }

    pub fn today(&mut self, today: NaiveDate) {
        self.current_date = today;
    }

    /// Drill into a day. From month view this is the one automatic switch
    /// to day view; returns whether the view changed.
    pub fn select_day(&mut self, date: NaiveDate) -> bool {
        self.selected_date = date;
        if self.current_view == ViewKind::Month {
            self.current_date = date;
            self.current_view = ViewKind::Day;
            return true;
        }
        false
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        match self.current_view {
            ViewKind::Day => vec![self.current_date],
            ViewKind::Week => CalendarView::new(self.current_date)
                .with_start_date(self.current_date.week_start(self.week_start))
                .with_days(7)
                .days(),
            ViewKind::Month => CalendarView::new(self.current_date.month_start())
                .with_days(self.current_date.days_in_month())
                .days(),
        }
    }

    pub fn label(&self) -> String {
        match self.current_view {
            ViewKind::Day => self.current_date.format("%A, %B %-d, %Y").to_string(),
            ViewKind::Week => {
                let start = self.current_date.week_start(self.week_start);
                let end = start + Duration::days(6);
                format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
            }
            ViewKind::Month => self.current_date.format("%B %Y").to_string(),
        }
    }
}

pub const MARKER_REFRESH_SECS: i64 = 60;

/// Display-only "now" line on the time grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentTimeMarker {
    at: NaiveDateTime,
}

impl CurrentTimeMarker {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { at: now }
    }

    /// Move the marker once a full refresh interval has passed (or the clock
    /// went backwards). Returns whether it moved.
    pub fn refresh(&mut self, now: NaiveDateTime) -> bool {
        let elapsed = now - self.at;
        if elapsed >= Duration::seconds(MARKER_REFRESH_SECS) || elapsed < Duration::zero() {
            self.at = now;
            return true;
        }
        false
    }

    pub fn at(&self) -> NaiveDateTime {
        self.at
    }

    pub fn position_px(&self, scale: GridScale) -> f64 {
        self.at.hour_of_day() * scale.pixels_per_hour()
    }

    pub fn label(&self) -> String {
        self.at.format("%H:%M").to_string()
    }

    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.at.date() == date
    }
}
