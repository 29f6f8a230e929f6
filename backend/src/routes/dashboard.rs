use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsResult;
use crate::models::{ActivityMatrix, DateRange};
use crate::services::{AggregationFacade, TrendPair};

// =========================================================
// Dashboard types + route
// =========================================================

/// Top-line metrics for the selected period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub gmv: f64,
    pub pv: u64,
    pub uv: u64,
}

/// One named series of a chart, aligned with the chart's date axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub name: String,
    pub values: Vec<u64>,
}

/// PV/UV line chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvUvTrend {
    pub dates: Vec<String>,
    pub series: Vec<TrendSeries>,
}

impl From<TrendPair> for PvUvTrend {
    fn from(pair: TrendPair) -> Self {
        Self {
            dates: pair.dates.iter().map(|d| d.to_string()).collect(),
            series: vec![
                TrendSeries {
                    name: pair.primary.name.clone(),
                    values: pair.primary.values(),
                },
                TrendSeries {
                    name: pair.secondary.name.clone(),
                    values: pair.secondary.values(),
                },
            ],
        }
    }
}

/// Sales of one category path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySale {
    pub name: String,
    pub value: f64,
}

/// Heatmap cells as `[hour, weekday, intensity]` triples.
pub fn heatmap_triples(matrix: &ActivityMatrix) -> Vec<[u64; 3]> {
    matrix
        .cells
        .iter()
        .map(|c| [c.hour as u64, c.weekday as u64, c.intensity])
        .collect()
}

/// Complete dashboard page payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub metrics: DashboardMetrics,
    pub pvuv_trend: PvUvTrend,
    pub category_sales: Vec<CategorySale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_heatmap: Option<Vec<[u64; 3]>>,
}

/// Route path for dashboard data
pub const GET_DASHBOARD_DATA: &str = "/api/data/dashboard";

/// Parse the optional query endpoints and build the dashboard bundle.
pub fn get_dashboard_data<R: Rng + ?Sized>(
    facade: &AggregationFacade,
    start_date: Option<&str>,
    end_date: Option<&str>,
    rng: &mut R,
) -> AnalyticsResult<DashboardData> {
    let range = DateRange::from_optional(start_date, end_date)?;
    facade.build_dashboard(range, rng)
}
