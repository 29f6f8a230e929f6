//! Bounded stochastic forecast with a confidence band.
//!
//! Each forecast day is anchored on the last historical value, shifted by a
//! drift draw and a fixed per-step growth. The band is built around the value
//! after it is drawn: first the total width, then how much of that width sits
//! below the value. `lower <= value <= upper` therefore holds by construction.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::calendar;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{ConfidenceBand, DateLabel, Forecast, Series};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParams {
    pub name: String,
    /// Inclusive lower bound of the drift over the last historical value
    pub drift_min: i64,
    /// Exclusive upper bound of the drift
    pub drift_max: i64,
    /// Added once per forecast step
    pub daily_growth: i64,
    /// Inclusive lower bound of the band width
    pub band_min: u64,
    /// Exclusive upper bound of the band width
    pub band_max: u64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            name: "PV".to_string(),
            drift_min: 5_000,
            drift_max: 20_000,
            daily_growth: 3_000,
            band_min: 15_000,
            band_max: 30_000,
        }
    }
}

impl ForecastParams {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.drift_min >= self.drift_max {
            return Err(AnalyticsError::configuration(format!(
                "forecast drift range [{}, {}) is empty",
                self.drift_min, self.drift_max
            ))
            .with_component("forecast"));
        }
        if self.band_min >= self.band_max {
            return Err(AnalyticsError::configuration(format!(
                "forecast band width range [{}, {}) is empty",
                self.band_min, self.band_max
            ))
            .with_component("forecast"));
        }
        Ok(())
    }
}

pub struct ForecastEngine<'a> {
    params: &'a ForecastParams,
}

impl<'a> ForecastEngine<'a> {
    pub fn new(params: &'a ForecastParams) -> Self {
        Self { params }
    }

    /// Forecast `horizon_days` days following the last point of `historical`.
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        historical: &Series<DateLabel>,
        horizon_days: u64,
        rng: &mut R,
    ) -> AnalyticsResult<Forecast> {
        self.params
            .validate()
            .map_err(|e| e.with_operation("forecast"))?;
        let last = historical.last().ok_or_else(|| {
            AnalyticsError::insufficient_data("cannot forecast from an empty history")
                .with_component("forecast")
                .with_operation("forecast")
        })?;

        let dates = calendar::expand_days(last.label.succ()?, horizon_days)?;
        let anchor = i64::try_from(last.value).unwrap_or(i64::MAX);

        let mut series = Series::new(self.params.name.clone());
        let mut lower = Series::new("lower");
        let mut upper = Series::new("upper");
        for (step, date) in dates.into_iter().enumerate() {
            let drift = rng.gen_range(self.params.drift_min..self.params.drift_max);
            let growth = self.params.daily_growth.saturating_mul(step as i64 + 1);
            let value = anchor.saturating_add(drift).saturating_add(growth).max(0) as u64;

            let width = rng.gen_range(self.params.band_min..self.params.band_max);
            let below = rng.gen_range(0..=width);
            let low = value.saturating_sub(below);
            let high = value.saturating_add(width - below);

            series.push(date, value);
            lower.push(date, low);
            upper.push(date, high);
        }

        log::debug!(
            "forecast {} days from {} (anchor {})",
            series.len(),
            last.label,
            anchor
        );

        Ok(Forecast {
            series,
            band: ConfidenceBand { lower, upper },
        })
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;
