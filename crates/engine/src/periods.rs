//! Rolling period boundaries (today, this week, this month).
//!
//! Weeks start on **Monday**. Every boundary is computed on naive wall-clock
//! time: transaction dates and the reference instant are assumed to be in the
//! same zone, no conversion happens here.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// A calendar interval.
///
/// Stored half-open as `[start, next_start)` and exposed closed as
/// `[start, end]`, where `end` is the last representable instant before
/// `next_start`. Both views describe the same set of instants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    start: NaiveDateTime,
    next_start: NaiveDateTime,
}

impl Interval {
    fn between(start: NaiveDate, next_start: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            next_start: next_start.and_time(NaiveTime::MIN),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Last instant inside the interval (inclusive upper bound).
    pub fn end(&self) -> NaiveDateTime {
        self.next_start - TimeDelta::nanoseconds(1)
    }

    /// Inclusive on both ends.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end()
    }
}

/// Day, week and month intervals around one reference instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodBounds {
    pub day: Interval,
    pub week: Interval,
    pub month: Interval,
}

impl PeriodBounds {
    pub fn at(now: NaiveDateTime) -> Self {
        let today = now.date();

        let day = Interval::between(today, next_day(today));

        let week_start = today
            .checked_sub_days(Days::new(u64::from(today.weekday().num_days_from_monday())))
            .unwrap_or(NaiveDate::MIN);
        let week_next = week_start
            .checked_add_days(Days::new(7))
            .unwrap_or(NaiveDate::MAX);
        let week = Interval::between(week_start, week_next);

        let month_start = today
            .checked_sub_days(Days::new(u64::from(today.day0())))
            .unwrap_or(today);
        let month_next = month_start
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        let month = Interval::between(month_start, month_next);

        Self { day, week, month }
    }
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(NaiveDate::MAX)
}
