use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsResult;
use crate::models::{DateLabel, Forecast, Series};
use crate::services::AggregationFacade;

// =========================================================
// Prediction types + route
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalData {
    pub dates: Vec<String>,
    pub pv: Vec<u64>,
}

impl From<&Series<DateLabel>> for HistoricalData {
    fn from(series: &Series<DateLabel>) -> Self {
        Self {
            dates: series.labels().map(|d| d.to_string()).collect(),
            pv: series.values(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub upper: Vec<u64>,
    pub lower: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastData {
    pub dates: Vec<String>,
    pub pv: Vec<u64>,
    pub confidence_interval: ConfidenceInterval,
}

impl From<Forecast> for ForecastData {
    fn from(forecast: Forecast) -> Self {
        Self {
            dates: forecast.series.labels().map(|d| d.to_string()).collect(),
            pv: forecast.series.values(),
            confidence_interval: ConfidenceInterval {
                upper: forecast.band.upper.values(),
                lower: forecast.band.lower.values(),
            },
        }
    }
}

/// Prediction page payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionData {
    pub historical: HistoricalData,
    pub forecast: ForecastData,
}

/// Route path for prediction data
pub const GET_PREDICTION_DATA: &str = "/api/data/prediction";

pub fn get_prediction_data<R: Rng + ?Sized>(
    facade: &AggregationFacade,
    rng: &mut R,
) -> AnalyticsResult<PredictionData> {
    facade.build_prediction(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConfidenceBand;

    #[test]
    fn test_forecast_serializes_confidence_interval() {
        let date = DateLabel::parse("2019-11-01").unwrap();
        let mut series = Series::new("PV");
        series.push(date, 100);
        let mut lower = Series::new("lower");
        lower.push(date, 90);
        let mut upper = Series::new("upper");
        upper.push(date, 120);

        let data = ForecastData::from(Forecast {
            series,
            band: ConfidenceBand { lower, upper },
        });
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["dates"][0], "2019-11-01");
        assert_eq!(json["confidenceInterval"]["upper"][0], 120);
        assert_eq!(json["confidenceInterval"]["lower"][0], 90);
    }
}
