use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::core::types::WeekStart;

pub trait NaiveDateExt {
    /// Local midnight opening the day.
    fn day_start(self) -> NaiveDateTime;
    /// Last representable millisecond of the day (23:59:59.999).
    fn day_end(self) -> NaiveDateTime;
    fn week_start(self, first: WeekStart) -> NaiveDate;
    fn week_end(self, first: WeekStart) -> NaiveDate;
    fn month_start(self) -> NaiveDate;
    fn days_in_month(self) -> u32;
    /// Shift by whole months, clamping to the last day of a shorter month.
    fn shift_months(self, months: i32) -> NaiveDate;
}

impl NaiveDateExt for NaiveDate {
    fn day_start(self) -> NaiveDateTime {
        self.and_time(NaiveTime::default())
    }

    fn day_end(self) -> NaiveDateTime {
        self.day_start() + Duration::days(1) - Duration::milliseconds(1)
    }

    fn week_start(self, first: WeekStart) -> NaiveDate {
        let day = self.weekday().num_days_from_monday();
        let anchor = first.weekday().num_days_from_monday();
        let back = (7 + day - anchor) % 7;
        self - Duration::days(back as i64)
    }

    fn week_end(self, first: WeekStart) -> NaiveDate {
        self.week_start(first) + Duration::days(6)
    }

    fn month_start(self) -> NaiveDate {
        self - Duration::days(self.day0() as i64)
    }

    fn days_in_month(self) -> u32 {
        let first = self.month_start();
        let next = first.shift_months(1);
        (next - first).num_days() as u32
    }

    fn shift_months(self, months: i32) -> NaiveDate {
        let shifted = if months >= 0 {
            self.checked_add_months(Months::new(months as u32))
        } else {
            self.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or(self)
    }
}

pub trait NaiveDateTimeExt {
    /// Drop the seconds and sub-second part.
    fn floor_minute(self) -> NaiveDateTime;
    /// Fractional hours since midnight.
    fn hour_of_day(self) -> f64;
}

impl NaiveDateTimeExt for NaiveDateTime {
    fn floor_minute(self) -> NaiveDateTime {
        self - Duration::seconds(self.second() as i64)
            - Duration::nanoseconds(self.nanosecond() as i64)
    }

    fn hour_of_day(self) -> f64 {
        self.hour() as f64 + self.minute() as f64 / 60.0
    }
}
