use serde::{Deserialize, Serialize};

use super::conversion::NamedValue;
use crate::error::AnalyticsResult;
use crate::services::AggregationFacade;

/// User insight page payload (RFM tiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInsightData {
    pub user_segmentation: Vec<NamedValue>,
}

/// Route path for user insight data
pub const GET_USER_INSIGHT_DATA: &str = "/api/data/user-insight";

pub fn get_user_insight_data(facade: &AggregationFacade) -> AnalyticsResult<UserInsightData> {
    facade.build_user_insight()
}
