//! Calendar expansion and day classification.
//!
//! Date arithmetic is delegated to chrono so month/year rollovers and leap
//! years need no special handling here.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{DateLabel, DateRange, DayClass};

/// Recurring holiday window: days `first_day..=last_day` of `month`, every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRule {
    pub month: u32,
    pub first_day: u32,
    pub last_day: u32,
}

impl HolidayRule {
    pub fn matches(&self, label: &DateLabel) -> bool {
        label.month() == self.month && (self.first_day..=self.last_day).contains(&label.day())
    }
}

/// Holiday predicate built from recurring rules plus one-off dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolidayCalendar {
    pub rules: Vec<HolidayRule>,
    pub dates: Vec<DateLabel>,
}

impl Default for HolidayCalendar {
    /// The October 1-7 national holiday promotion window.
    fn default() -> Self {
        Self {
            rules: vec![HolidayRule {
                month: 10,
                first_day: 1,
                last_day: 7,
            }],
            dates: Vec::new(),
        }
    }
}

impl HolidayCalendar {
    /// A calendar with no holidays at all.
    pub fn none() -> Self {
        Self {
            rules: Vec::new(),
            dates: Vec::new(),
        }
    }

    pub fn is_holiday(&self, label: &DateLabel) -> bool {
        self.rules.iter().any(|r| r.matches(label)) || self.dates.contains(label)
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        for rule in &self.rules {
            if !(1..=12).contains(&rule.month) {
                return Err(AnalyticsError::configuration(format!(
                    "holiday rule month {} outside 1..=12",
                    rule.month
                ))
                .with_component("calendar"));
            }
            if rule.first_day == 0 || rule.last_day > 31 || rule.first_day > rule.last_day {
                return Err(AnalyticsError::configuration(format!(
                    "holiday rule days {}..={} are not a valid day window",
                    rule.first_day, rule.last_day
                ))
                .with_component("calendar"));
            }
        }
        Ok(())
    }
}

/// Every day from `start` to `end`, both included, one day apart.
pub fn expand(start: DateLabel, end: DateLabel) -> AnalyticsResult<Vec<DateLabel>> {
    let range = DateRange::new(start, end).map_err(|e| e.with_operation("expand"))?;
    expand_range(&range)
}

/// Every day of `range`.
pub fn expand_range(range: &DateRange) -> AnalyticsResult<Vec<DateLabel>> {
    expand_days(range.start, range.len_days())
}

/// `count` consecutive days beginning at `start`.
pub fn expand_days(start: DateLabel, count: u64) -> AnalyticsResult<Vec<DateLabel>> {
    let mut labels = Vec::with_capacity(count as usize);
    let mut current = start;
    for i in 0..count {
        labels.push(current);
        if i + 1 < count {
            current = current.succ()?;
        }
    }
    Ok(labels)
}

/// Weekend/holiday classification of one day.
pub fn classify(label: &DateLabel, holidays: &HolidayCalendar) -> DayClass {
    DayClass {
        is_weekend: label.is_weekend(),
        is_holiday: holidays.is_holiday(label),
    }
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod calendar_tests;
