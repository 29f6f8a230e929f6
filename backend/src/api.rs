//! Public API surface for the analytics backend.
//!
//! This file consolidates the payload types served under `/api/data/*` and
//! the `{code, message, data}` envelope that wraps every response.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::conversion::ConversionData;
pub use crate::routes::conversion::NamedValue;
pub use crate::routes::conversion::SankeyData;
pub use crate::routes::conversion::SankeyLink;
pub use crate::routes::conversion::SankeyNode;
pub use crate::routes::dashboard::CategorySale;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::DashboardMetrics;
pub use crate::routes::dashboard::PvUvTrend;
pub use crate::routes::dashboard::TrendSeries;
pub use crate::routes::prediction::ConfidenceInterval;
pub use crate::routes::prediction::ForecastData;
pub use crate::routes::prediction::HistoricalData;
pub use crate::routes::prediction::PredictionData;
pub use crate::routes::product::BrandTop10;
pub use crate::routes::product::ProductData;
pub use crate::routes::product::WordCloudEntry;
pub use crate::routes::user_insight::UserInsightData;

use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Envelope code for a successful response.
pub const CODE_OK: u16 = 200;
/// Envelope code for a rejected request.
pub const CODE_BAD_REQUEST: u16 = 400;
/// Envelope code for a failure inside the service.
pub const CODE_INTERNAL: u16 = 500;

/// Response envelope shared by every data endpoint.
///
/// `data` is `null` when `code` is not [`CODE_OK`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_OK,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn failure(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_OK
    }
}

impl<T> From<&AnalyticsError> for ApiResponse<T> {
    fn from(err: &AnalyticsError) -> Self {
        let code = if err.is_client_error() {
            CODE_BAD_REQUEST
        } else {
            CODE_INTERNAL
        };
        Self::failure(code, err.to_string())
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
