//! Daily traffic trend synthesis.
//!
//! A primary series (page views) gets one uniform draw per day plus additive
//! weekend/holiday boosts. The secondary series (unique visitors) is a random
//! per-day fraction of the primary.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::calendar::{self, HolidayCalendar};
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{DateLabel, DateRange, Series, SeriesPoint};

/// Parameters of the daily trend draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParams {
    pub primary_name: String,
    pub secondary_name: String,
    /// Inclusive lower bound of the base draw
    pub base_min: u64,
    /// Exclusive upper bound of the base draw
    pub base_max: u64,
    pub weekend_boost: u64,
    pub holiday_boost: u64,
    pub secondary_ratio_min: f64,
    pub secondary_ratio_max: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            primary_name: "PV".to_string(),
            secondary_name: "UV".to_string(),
            base_min: 50_000,
            base_max: 70_000,
            weekend_boost: 15_000,
            holiday_boost: 40_000,
            secondary_ratio_min: 0.2,
            secondary_ratio_max: 0.3,
        }
    }
}

impl TrendParams {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.base_min >= self.base_max {
            return Err(AnalyticsError::configuration(format!(
                "trend base range [{}, {}) is empty",
                self.base_min, self.base_max
            ))
            .with_component("trends"));
        }
        let ceiling = (self.base_max - 1)
            .checked_add(self.weekend_boost)
            .and_then(|v| v.checked_add(self.holiday_boost));
        if ceiling.is_none() {
            return Err(AnalyticsError::configuration(format!(
                "trend base_max {} plus boosts {} and {} overflows",
                self.base_max, self.weekend_boost, self.holiday_boost
            ))
            .with_component("trends"));
        }
        let ratio_ok = self.secondary_ratio_min.is_finite()
            && self.secondary_ratio_max.is_finite()
            && self.secondary_ratio_min >= 0.0
            && self.secondary_ratio_max <= 1.0
            && self.secondary_ratio_min < self.secondary_ratio_max;
        if !ratio_ok {
            return Err(AnalyticsError::configuration(format!(
                "secondary ratio range [{}, {}) must be a non-empty sub-range of [0, 1]",
                self.secondary_ratio_min, self.secondary_ratio_max
            ))
            .with_component("trends"));
        }
        Ok(())
    }
}

/// Primary and secondary series over the same dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPair {
    pub dates: Vec<DateLabel>,
    pub primary: Series<DateLabel>,
    pub secondary: Series<DateLabel>,
}

/// Produces seasonal daily series from a date sequence.
#[derive(Debug, Clone)]
pub struct TrendSynthesizer<'a> {
    params: &'a TrendParams,
    holidays: &'a HolidayCalendar,
}

impl<'a> TrendSynthesizer<'a> {
    pub fn new(params: &'a TrendParams, holidays: &'a HolidayCalendar) -> Self {
        Self { params, holidays }
    }

    /// One primary value per date: `uniform[base_min, base_max)` plus boosts.
    pub fn synthesize<R: Rng + ?Sized>(&self, dates: &[DateLabel], rng: &mut R) -> Series<DateLabel> {
        let mut series = Series::new(self.params.primary_name.clone());
        for date in dates {
            let class = calendar::classify(date, self.holidays);
            let mut value = rng.gen_range(self.params.base_min..self.params.base_max);
            if class.is_weekend {
                value = value.saturating_add(self.params.weekend_boost);
            }
            if class.is_holiday {
                value = value.saturating_add(self.params.holiday_boost);
            }
            series.push(*date, value);
        }
        series
    }

    /// `floor(primary * ratio)` per point, with `ratio` drawn per point.
    pub fn derive_secondary<R: Rng + ?Sized>(
        &self,
        primary: &Series<DateLabel>,
        rng: &mut R,
    ) -> Series<DateLabel> {
        let points = primary
            .iter()
            .map(|point| {
                let ratio =
                    rng.gen_range(self.params.secondary_ratio_min..self.params.secondary_ratio_max);
                SeriesPoint::new(point.label, (point.value as f64 * ratio).floor() as u64)
            })
            .collect();
        Series::with_points(self.params.secondary_name.clone(), points)
    }

    /// Primary and secondary series over `dates`.
    pub fn synthesize_pair<R: Rng + ?Sized>(&self, dates: Vec<DateLabel>, rng: &mut R) -> TrendPair {
        let primary = self.synthesize(&dates, rng);
        let secondary = self.derive_secondary(&primary, rng);
        TrendPair {
            dates,
            primary,
            secondary,
        }
    }

    /// Expand `range` and synthesize both series over it.
    pub fn synthesize_range<R: Rng + ?Sized>(
        &self,
        range: &DateRange,
        rng: &mut R,
    ) -> AnalyticsResult<TrendPair> {
        let dates = calendar::expand_range(range)?;
        Ok(self.synthesize_pair(dates, rng))
    }
}

#[cfg(test)]
#[path = "trends_tests.rs"]
mod trends_tests;
