// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The active reporting interval and its named presets.
//!
//! Bounds are inclusive on both ends. Presets take `now` explicitly so the
//! same call always produces the same range; the CLI passes the local clock.

use crate::error::{Error, Result};
use crate::models::Transaction;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    // 23:59:59 always exists on a naive date
    d.and_hms_opt(23, 59, 59).unwrap_or_else(|| d.and_time(NaiveTime::MIN))
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

/// Last calendar day of the month containing `d`.
pub fn last_day_of_month(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    first_of_month(y, m).pred_opt().unwrap_or(d)
}

/// Year and 1-based month of the month before `d`, rolling over January.
pub fn previous_month(d: NaiveDate) -> (i32, u32) {
    if d.month() == 1 {
        (d.year() - 1, 12)
    } else {
        (d.year(), d.month() - 1)
    }
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(DateRange { start, end })
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at <= self.end
    }

    pub fn current_month(now: NaiveDateTime) -> Self {
        let today = now.date();
        DateRange {
            start: first_of_month(today.year(), today.month()).and_time(NaiveTime::MIN),
            end: end_of_day(last_day_of_month(today)),
        }
    }

    pub fn last_month(now: NaiveDateTime) -> Self {
        let (y, m) = previous_month(now.date());
        let first = first_of_month(y, m);
        DateRange {
            start: first.and_time(NaiveTime::MIN),
            end: end_of_day(last_day_of_month(first)),
        }
    }

    /// `days` days back from `now`, keeping the time of day.
    pub fn trailing_days(now: NaiveDateTime, days: i64) -> Self {
        DateRange {
            start: now - Duration::days(days),
            end: now,
        }
    }

    pub fn this_year(now: NaiveDateTime) -> Self {
        let y = now.year();
        DateRange {
            start: first_of_month(y, 1).and_time(NaiveTime::MIN),
            end: end_of_day(NaiveDate::from_ymd_opt(y, 12, 31).unwrap_or(NaiveDate::MAX)),
        }
    }

    /// Wide sentinel range standing in for "no filter".
    pub fn all_time() -> Self {
        DateRange {
            start: first_of_month(2000, 1).and_time(NaiveTime::MIN),
            end: end_of_day(NaiveDate::from_ymd_opt(2100, 12, 31).unwrap_or(NaiveDate::MAX)),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start.date(), self.end.date())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    ThisMonth,
    LastMonth,
    Last30Days,
    Last90Days,
    ThisYear,
    AllTime,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::ThisMonth,
        Preset::LastMonth,
        Preset::Last30Days,
        Preset::Last90Days,
        Preset::ThisYear,
        Preset::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::ThisMonth => "this-month",
            Preset::LastMonth => "last-month",
            Preset::Last30Days => "last-30-days",
            Preset::Last90Days => "last-90-days",
            Preset::ThisYear => "this-year",
            Preset::AllTime => "all-time",
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Preset::ALL.iter().map(|p| p.as_str()).collect();
                format!("Unknown range '{}', expected one of {}", s, names.join(", "))
            })
    }
}

/// Holds the active range. Every operation replaces both bounds together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeState {
    range: DateRange,
}

impl Default for DateRangeState {
    fn default() -> Self {
        DateRangeState::new(Local::now().naive_local())
    }
}

impl DateRangeState {
    /// Starts on the calendar month containing `now`.
    pub fn new(now: NaiveDateTime) -> Self {
        DateRangeState {
            range: DateRange::current_month(now),
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn start(&self) -> NaiveDateTime {
        self.range.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.range.end
    }

    pub fn set_range(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        self.range = DateRange::new(start, end)?;
        Ok(())
    }

    pub fn to_current_month(&mut self, now: NaiveDateTime) {
        self.range = DateRange::current_month(now);
    }

    pub fn to_last_month(&mut self, now: NaiveDateTime) {
        self.range = DateRange::last_month(now);
    }

    pub fn to_last_30_days(&mut self, now: NaiveDateTime) {
        self.range = DateRange::trailing_days(now, 30);
    }

    pub fn to_last_90_days(&mut self, now: NaiveDateTime) {
        self.range = DateRange::trailing_days(now, 90);
    }

    pub fn to_this_year(&mut self, now: NaiveDateTime) {
        self.range = DateRange::this_year(now);
    }

    pub fn to_all_time(&mut self) {
        self.range = DateRange::all_time();
    }

    pub fn apply(&mut self, preset: Preset, now: NaiveDateTime) {
        match preset {
            Preset::ThisMonth => self.to_current_month(now),
            Preset::LastMonth => self.to_last_month(now),
            Preset::Last30Days => self.to_last_30_days(now),
            Preset::Last90Days => self.to_last_90_days(now),
            Preset::ThisYear => self.to_this_year(now),
            Preset::AllTime => self.to_all_time(),
        }
    }

    pub fn filter(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        filter_by_date_range(transactions, Some(self.start()), Some(self.end()))
    }
}

/// Keeps transactions with `start <= date <= end`. When either bound is
/// missing the input comes back unchanged.
pub fn filter_by_date_range(
    transactions: &[Transaction],
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Vec<Transaction> {
    let (Some(start), Some(end)) = (start, end) else {
        return transactions.to_vec();
    };
    transactions
        .iter()
        .filter(|t| start <= t.date && t.date <= end)
        .cloned()
        .collect()
}
