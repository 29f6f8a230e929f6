use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::services::AggregationFacade;

// =========================================================
// Product types + route
// =========================================================

/// Parallel brand/sales arrays, sorted by sales descending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandTop10 {
    pub brands: Vec<String>,
    pub sales: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCloudEntry {
    pub name: String,
    pub value: u64,
}

/// Complete product page payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductData {
    pub brand_top10: BrandTop10,
    pub category_word_cloud: Vec<WordCloudEntry>,
    /// `[price, volume]` pairs
    pub price_sensitivity: Vec<[u64; 2]>,
}

/// Route path for product data
pub const GET_PRODUCT_DATA: &str = "/api/data/product";

pub fn get_product_data<R: Rng + ?Sized>(facade: &AggregationFacade, rng: &mut R) -> ProductData {
    facade.build_product(rng)
}
