//! Report date ranges

use crate::error::ReportError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quick-pick week selections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekPreset {
    /// Monday to Sunday of the current week
    This,
    /// The week before the current one
    Last,
    /// The two full weeks before the current one
    LastTwo,
}

/// Inclusive calendar-day range a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportRange {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl ReportRange {
    /// Explicit range; `start` must not be after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Range for a preset relative to `today`
    pub fn preset(preset: WeekPreset, today: NaiveDate) -> Self {
        let this_monday = today - Duration::days(today.weekday().num_days_from_monday() as i64);
        let last_monday = this_monday - Duration::days(7);
        let (start, end) = match preset {
            WeekPreset::This => (this_monday, this_monday + Duration::days(6)),
            WeekPreset::Last => (last_monday, last_monday + Duration::days(6)),
            WeekPreset::LastTwo => (last_monday - Duration::days(7), last_monday + Duration::days(6)),
        };
        Self { start, end }
    }

    /// UTC instants bounding the range: start of the first day through the
    /// last microsecond of the final day
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.from_utc_datetime(&self.start.and_time(NaiveTime::MIN));
        let end = Utc.from_utc_datetime(&(self.end + Duration::days(1)).and_time(NaiveTime::MIN))
            - Duration::microseconds(1);
        (start, end)
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start, self.end)
    }
}
