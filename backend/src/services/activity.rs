//! Hour-by-weekday activity heatmap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{ActivityCell, ActivityMatrix, DAYS_PER_WEEK, HOURS_PER_DAY};

/// Base draw bounds and additive biases for the activity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityParams {
    /// Exclusive upper bound of the base draw, which starts at zero
    pub base_max: u64,
    pub peak_start_hour: u8,
    pub peak_end_hour: u8,
    pub peak_bias: u64,
    pub weekend_start: u8,
    pub weekend_end: u8,
    pub weekend_bias: u64,
}

impl Default for ActivityParams {
    fn default() -> Self {
        Self {
            base_max: 50,
            peak_start_hour: 19,
            peak_end_hour: 23,
            peak_bias: 50,
            weekend_start: 5,
            weekend_end: 6,
            weekend_bias: 30,
        }
    }
}

impl ActivityParams {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.base_max == 0 {
            return Err(AnalyticsError::configuration("activity base_max must be positive")
                .with_component("activity"));
        }
        let ceiling = (self.base_max - 1)
            .checked_add(self.peak_bias)
            .and_then(|v| v.checked_add(self.weekend_bias));
        if ceiling.is_none() {
            return Err(AnalyticsError::configuration(format!(
                "activity base_max {} plus biases {} and {} overflows",
                self.base_max, self.peak_bias, self.weekend_bias
            ))
            .with_component("activity"));
        }
        if self.peak_start_hour > self.peak_end_hour || self.peak_end_hour >= HOURS_PER_DAY {
            return Err(AnalyticsError::configuration(format!(
                "peak hours {}..={} are not within 0..=23",
                self.peak_start_hour, self.peak_end_hour
            ))
            .with_component("activity"));
        }
        if self.weekend_start > self.weekend_end || self.weekend_end >= DAYS_PER_WEEK {
            return Err(AnalyticsError::configuration(format!(
                "weekend days {}..={} are not within 0..=6",
                self.weekend_start, self.weekend_end
            ))
            .with_component("activity"));
        }
        Ok(())
    }

    fn is_peak_hour(&self, hour: u8) -> bool {
        (self.peak_start_hour..=self.peak_end_hour).contains(&hour)
    }

    fn is_weekend(&self, weekday: u8) -> bool {
        (self.weekend_start..=self.weekend_end).contains(&weekday)
    }
}

pub struct ActivityMatrixGenerator<'a> {
    params: &'a ActivityParams,
}

impl<'a> ActivityMatrixGenerator<'a> {
    pub fn new(params: &'a ActivityParams) -> Self {
        Self { params }
    }

    /// All 168 cells, hour-major, each a base draw plus peak/weekend bias.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ActivityMatrix {
        let mut cells = Vec::with_capacity(HOURS_PER_DAY as usize * DAYS_PER_WEEK as usize);
        for hour in 0..HOURS_PER_DAY {
            for weekday in 0..DAYS_PER_WEEK {
                let mut intensity = rng.gen_range(0..self.params.base_max);
                if self.params.is_peak_hour(hour) {
                    intensity = intensity.saturating_add(self.params.peak_bias);
                }
                if self.params.is_weekend(weekday) {
                    intensity = intensity.saturating_add(self.params.weekend_bias);
                }
                cells.push(ActivityCell {
                    hour,
                    weekday,
                    intensity,
                });
            }
        }
        ActivityMatrix { cells }
    }
}
