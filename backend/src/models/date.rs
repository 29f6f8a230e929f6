use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Calendar day normalized to `YYYY-MM-DD`.
///
/// Ordering follows the calendar. Weekday indices count from Monday (0) to
/// Sunday (6), so the weekend is `{5, 6}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateLabel(NaiveDate);

impl DateLabel {
    /// Wire format of a label.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Wrap a chrono date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a label from year/month/day, rejecting impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> AnalyticsResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                AnalyticsError::invalid_range(format!(
                    "{:04}-{:02}-{:02} is not a calendar date",
                    year, month, day
                ))
            })
    }

    /// Parse a strict `YYYY-MM-DD` string.
    pub fn parse(input: &str) -> AnalyticsResult<Self> {
        let trimmed = input.trim();
        // chrono accepts single-digit months/days; labels must be zero-padded
        if trimmed.len() != 10 {
            return Err(AnalyticsError::invalid_range(format!(
                "'{}' is not a YYYY-MM-DD date",
                input
            )));
        }
        NaiveDate::parse_from_str(trimmed, Self::FORMAT)
            .map(Self)
            .map_err(|e| {
                AnalyticsError::invalid_range(format!("'{}' is not a YYYY-MM-DD date", input))
                    .with_details(e.to_string())
            })
    }

    /// Underlying chrono date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Weekday index, Monday = 0 .. Sunday = 6.
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_monday() as u8
    }

    /// Saturday or Sunday.
    pub fn is_weekend(&self) -> bool {
        self.weekday_index() >= 5
    }

    /// The label `days` days later.
    pub fn plus_days(&self, days: u64) -> AnalyticsResult<Self> {
        self.0
            .checked_add_days(Days::new(days))
            .map(Self)
            .ok_or_else(|| {
                AnalyticsError::invalid_range(format!("{} + {} days overflows the calendar", self, days))
            })
    }

    /// The following calendar day.
    pub fn succ(&self) -> AnalyticsResult<Self> {
        self.plus_days(1)
    }

    /// The label `days` days earlier.
    pub fn minus_days(&self, days: u64) -> AnalyticsResult<Self> {
        self.0
            .checked_sub_days(Days::new(days))
            .map(Self)
            .ok_or_else(|| {
                AnalyticsError::invalid_range(format!("{} - {} days underflows the calendar", self, days))
            })
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &DateLabel) -> i64 {
        (other.0 - self.0).num_days()
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl FromStr for DateLabel {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateLabel {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for DateLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateLabel::parse(&raw).map_err(de::Error::custom)
    }
}

/// Inclusive calendar range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateLabel,
    pub end: DateLabel,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: DateLabel, end: DateLabel) -> AnalyticsResult<Self> {
        if start > end {
            return Err(AnalyticsError::invalid_range(format!(
                "start {} is after end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse both endpoints from `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> AnalyticsResult<Self> {
        Self::new(DateLabel::parse(start)?, DateLabel::parse(end)?)
    }

    /// Interpret optional query parameters: both absent means "no range",
    /// a single endpoint is rejected.
    pub fn from_optional(start: Option<&str>, end: Option<&str>) -> AnalyticsResult<Option<Self>> {
        fn blank(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }
        match (blank(start), blank(end)) {
            (None, None) => Ok(None),
            (Some(s), Some(e)) => Self::parse(s, e).map(Some),
            (Some(_), None) => Err(AnalyticsError::invalid_range(
                "start date supplied without an end date",
            )),
            (None, Some(_)) => Err(AnalyticsError::invalid_range(
                "end date supplied without a start date",
            )),
        }
    }

    /// Number of days covered, both endpoints included.
    pub fn len_days(&self) -> u64 {
        self.start.days_until(&self.end) as u64 + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Calendar classification of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayClass {
    pub is_weekend: bool,
    pub is_holiday: bool,
}
