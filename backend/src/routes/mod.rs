pub mod conversion;
pub mod dashboard;
pub mod prediction;
pub mod product;
pub mod user_insight;
