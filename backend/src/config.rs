//! Static dashboard configuration.
//!
//! Brand tables, category taxonomy, holiday calendar and generator parameters
//! are read once at start-up from TOML, validated, and then shared read-only.
//! Every field has a default, so a missing or partial file still yields a
//! complete configuration.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{DateLabel, DateRange};
use crate::services::activity::ActivityParams;
use crate::services::calendar::HolidayCalendar;
use crate::services::flow::validate_flow;
use crate::services::forecast::ForecastParams;
use crate::services::funnel::validate_retention_rates;
use crate::services::segmentation::validate_proportions;
use crate::services::trends::TrendParams;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "INSIGHT_CONFIG";
/// Environment variable fixing the random seed.
pub const SEED_ENV: &str = "INSIGHT_SEED";

/// Complete configuration of the analytics core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub calendar: HolidayCalendar,
    pub dashboard: DashboardConfig,
    pub conversion: ConversionConfig,
    pub product: ProductConfig,
    pub user_insight: UserInsightConfig,
    pub prediction: PredictionConfig,
    pub random: RandomConfig,
}

/// A category path (`Top.Sub`) and its sales total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub name: String,
    pub value: f64,
}

/// A named count, used for word-cloud terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub value: u64,
}

/// A brand and its sales volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSales {
    pub name: String,
    pub sales: f64,
}

/// A named share of a partitioned total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentShare {
    pub name: String,
    pub proportion: f64,
}

/// A total and the shares it is partitioned into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTable {
    pub total: u64,
    pub buckets: Vec<SegmentShare>,
}

impl SegmentTable {
    pub fn names(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn proportions(&self) -> Vec<f64> {
        self.buckets.iter().map(|b| b.proportion).collect()
    }

    pub fn validate(&self) -> AnalyticsResult<()> {
        validate_proportions(&self.proportions(), &self.names())
    }

    fn from_pairs(total: u64, pairs: &[(&str, f64)]) -> Self {
        Self {
            total,
            buckets: pairs
                .iter()
                .map(|(name, proportion)| SegmentShare {
                    name: name.to_string(),
                    proportion: *proportion,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_start: DateLabel,
    pub default_end: DateLabel,
    pub gmv: f64,
    pub pv: u64,
    pub uv: u64,
    /// Relative jitter applied to range-scaled metrics, drawn from `[-j, j)`
    pub metric_jitter: f64,
    /// Longest range a request may ask for, in days
    pub max_range_days: u64,
    pub trend: TrendParams,
    pub activity: ActivityParams,
    pub category_sales: Vec<CategorySales>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let category_sales = [
            ("Electronics.Smartphone", 14_500_000.0),
            ("Electronics.Laptop", 8_500_000.0),
            ("Electronics.Headphone", 3_000_000.0),
            ("Appliances.Kitchen", 6_200_000.0),
            ("Appliances.Cleaning", 2_000_000.0),
            ("Furniture.LivingRoom", 4_200_000.0),
            ("Furniture.Bedroom", 2_100_000.0),
            ("Apparel.Shoes", 1_800_000.0),
            ("Apparel.Clothing", 1_000_000.0),
        ]
        .iter()
        .map(|(name, value)| CategorySales {
            name: name.to_string(),
            value: *value,
        })
        .collect();

        Self {
            default_start: DateLabel::new(october_2019(1)),
            default_end: DateLabel::new(october_2019(31)),
            gmv: 42_580_000.0,
            pv: 8_580_000,
            uv: 1_250_000,
            metric_jitter: 0.1,
            max_range_days: 366,
            trend: TrendParams::default(),
            activity: ActivityParams::default(),
            category_sales,
        }
    }
}

impl DashboardConfig {
    pub fn default_range(&self) -> AnalyticsResult<DateRange> {
        DateRange::new(self.default_start, self.default_end)
    }

    /// Reject requested ranges longer than `max_range_days`.
    pub fn check_range(&self, range: &DateRange) -> AnalyticsResult<()> {
        if range.len_days() > self.max_range_days {
            return Err(AnalyticsError::invalid_range(format!(
                "{} spans {} days, limit is {}",
                range,
                range.len_days(),
                self.max_range_days
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    pub stages: Vec<String>,
    pub top_volume: u64,
    pub retention_rates: Vec<f64>,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            stages: strings(&["View", "Cart", "Order", "Pay"]),
            top_volume: 1_580_000,
            retention_rates: vec![0.2848, 0.2667, 0.7917],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SankeyConfig {
    pub stages: Vec<String>,
    pub drop_rates: Vec<f64>,
    pub total: u64,
    pub sink: String,
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            stages: strings(&[
                "Home",
                "Product List",
                "Product Detail",
                "Cart",
                "Checkout",
                "Paid",
            ]),
            drop_rates: vec![0.2, 0.25, 0.5, 1.0 / 3.0, 0.1],
            total: 100_000,
            sink: "Churned".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    pub funnel: FunnelConfig,
    pub sankey: SankeyConfig,
    pub events: SegmentTable,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            funnel: FunnelConfig::default(),
            sankey: SankeyConfig::default(),
            events: SegmentTable::from_pairs(
                4_200_000,
                &[
                    ("view", 0.82),
                    ("cart", 0.09),
                    ("remove_from_cart", 0.06),
                    ("purchase", 0.03),
                ],
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    pub brands: Vec<BrandSales>,
    pub word_cloud: Vec<NamedCount>,
    pub price_points: usize,
    /// Exclusive upper bound of scatter prices
    pub price_max: u64,
    /// Exclusive upper bound of scatter volumes
    pub volume_max: u64,
}

impl Default for ProductConfig {
    fn default() -> Self {
        let brands = [
            ("Apple", 45_000.0),
            ("Xiaomi", 42_000.0),
            ("Huawei", 38_000.0),
            ("Samsung", 35_000.0),
            ("Oppo", 28_000.0),
            ("Vivo", 25_000.0),
            ("Sony", 18_000.0),
            ("LG", 15_000.0),
            ("Lenovo", 12_000.0),
            ("Asus", 9_000.0),
        ]
        .iter()
        .map(|(name, sales)| BrandSales {
            name: name.to_string(),
            sales: *sales,
        })
        .collect();

        let word_cloud = [
            ("Smartphone", 1500),
            ("Laptop", 1200),
            ("Tablet", 950),
            ("Smartwatch", 850),
            ("Bluetooth Earbuds", 800),
            ("Smart TV", 750),
            ("Game Console", 700),
            ("Digital Camera", 650),
            ("Air Purifier", 600),
            ("Robot Vacuum", 580),
            ("Rice Cooker", 550),
            ("Microwave", 520),
            ("Washing Machine", 500),
            ("Refrigerator", 480),
            ("Air Conditioner", 460),
            ("Water Heater", 440),
            ("Power Bank", 420),
            ("Charging Cable", 400),
            ("Phone Case", 380),
            ("Keyboard", 360),
            ("Mouse", 340),
            ("Monitor", 320),
            ("Speaker", 300),
            ("USB Drive", 280),
            ("Electric Toothbrush", 260),
            ("Hair Dryer", 240),
            ("Shaver", 220),
            ("Coffee Maker", 200),
            ("Juicer", 180),
            ("Electric Kettle", 160),
            ("Humidifier", 140),
            ("Electric Fan", 120),
        ]
        .iter()
        .map(|(name, value)| NamedCount {
            name: name.to_string(),
            value: *value,
        })
        .collect();

        Self {
            brands,
            word_cloud,
            price_points: 50,
            price_max: 5_000,
            volume_max: 8_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInsightConfig {
    pub segments: SegmentTable,
}

impl Default for UserInsightConfig {
    fn default() -> Self {
        Self {
            segments: SegmentTable::from_pairs(
                286_500,
                &[
                    ("High Value", 0.055),
                    ("Potential", 0.089),
                    ("Needs Recall", 0.158),
                    ("General Value", 0.280),
                    ("Churned", 0.418),
                ],
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub history_end: DateLabel,
    pub history_days: u64,
    pub horizon_days: u64,
    pub history: TrendParams,
    pub forecast: ForecastParams,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            history_end: DateLabel::new(october_2019(31)),
            history_days: 7,
            horizon_days: 7,
            history: TrendParams {
                base_min: 180_000,
                base_max: 210_000,
                weekend_boost: 0,
                holiday_boost: 0,
                ..TrendParams::default()
            },
            forecast: ForecastParams::default(),
        }
    }
}

impl PredictionConfig {
    /// The `history_days` days ending at `history_end`.
    pub fn history_range(&self) -> AnalyticsResult<DateRange> {
        let start = self.history_end.minus_days(self.history_days.saturating_sub(1))?;
        DateRange::new(start, self.history_end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// Fixed seed; every request then replays the same stream.
    pub seed: Option<u64>,
}

/// How each request obtains its random stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSource {
    /// A fresh OS-seeded generator per request.
    Entropy,
    /// A generator reseeded with the same value for every request.
    Seeded(u64),
}

impl RandomSource {
    pub fn rng(&self) -> StdRng {
        match self {
            RandomSource::Entropy => StdRng::from_entropy(),
            RandomSource::Seeded(seed) => StdRng::seed_from_u64(*seed),
        }
    }

    /// `INSIGHT_SEED` when set and numeric, else the configured seed, else entropy.
    pub fn resolve(config: &RandomConfig) -> AnalyticsResult<Self> {
        match env::var(SEED_ENV) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(RandomSource::Seeded)
                .map_err(|_| {
                    AnalyticsError::configuration(format!("{} must be an unsigned integer, got '{}'", SEED_ENV, raw))
                }),
            _ => Ok(config.seed.map_or(RandomSource::Entropy, RandomSource::Seeded)),
        }
    }
}

impl fmt::Display for RandomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomSource::Entropy => write!(f, "entropy"),
            RandomSource::Seeded(seed) => write!(f, "seeded({})", seed),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl AnalyticsConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        toml::from_str(content).map_err(|e| {
            AnalyticsError::configuration(format!("Failed to parse config: {}", e))
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AnalyticsResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalyticsError::configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Search for `insight.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn find_default_file() -> Option<PathBuf> {
        [
            PathBuf::from("insight.toml"),
            PathBuf::from("backend/insight.toml"),
            PathBuf::from("../insight.toml"),
        ]
        .into_iter()
        .find(|p| p.exists())
    }

    /// Resolve, load and validate the configuration.
    ///
    /// `INSIGHT_CONFIG` wins, then the default locations, then the built-in
    /// defaults. An explicitly named file that cannot be read is an error.
    pub fn load() -> AnalyticsResult<(Self, ConfigSource)> {
        let (config, source) = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let path = PathBuf::from(path);
                (Self::from_file(&path)?, ConfigSource::File(path))
            }
            _ => match Self::find_default_file() {
                Some(path) => (Self::from_file(&path)?, ConfigSource::File(path)),
                None => (Self::default(), ConfigSource::Defaults),
            },
        };
        config.validate()?;
        Ok((config, source))
    }

    /// Check every table and parameter block.
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.calendar.validate()?;
        self.validate_dashboard()?;
        self.validate_conversion()?;
        self.validate_product()?;
        self.user_insight
            .segments
            .validate()
            .map_err(|e| e.with_details("user_insight.segments"))?;
        self.validate_prediction()?;
        Ok(())
    }

    fn validate_dashboard(&self) -> AnalyticsResult<()> {
        let d = &self.dashboard;
        d.default_range()
            .map_err(|e| AnalyticsError::configuration(e.to_string()).with_details("dashboard.default_range"))?;
        if !(d.gmv.is_finite() && d.gmv >= 0.0) {
            return Err(AnalyticsError::configuration(format!("dashboard gmv {} must be non-negative", d.gmv)));
        }
        if !(d.metric_jitter.is_finite() && (0.0..1.0).contains(&d.metric_jitter)) {
            return Err(AnalyticsError::configuration(format!(
                "dashboard metric_jitter {} outside [0, 1)",
                d.metric_jitter
            )));
        }
        let default_days = d.default_range()?.len_days();
        if d.max_range_days < default_days {
            return Err(AnalyticsError::configuration(format!(
                "dashboard max_range_days {} is shorter than the default period ({} days)",
                d.max_range_days, default_days
            )));
        }
        d.trend.validate().map_err(|e| e.with_details("dashboard.trend"))?;
        d.activity.validate().map_err(|e| e.with_details("dashboard.activity"))?;
        if let Some(bad) = d
            .category_sales
            .iter()
            .find(|c| !(c.value.is_finite() && c.value >= 0.0))
        {
            return Err(AnalyticsError::configuration(format!(
                "category '{}' has invalid sales {}",
                bad.name, bad.value
            )));
        }
        Ok(())
    }

    fn validate_conversion(&self) -> AnalyticsResult<()> {
        let c = &self.conversion;
        validate_retention_rates(c.funnel.stages.len(), &c.funnel.retention_rates)
            .map_err(|e| e.with_details("conversion.funnel"))?;
        validate_flow(&c.sankey.stages, &c.sankey.drop_rates, &c.sankey.sink)
            .map_err(|e| e.with_details("conversion.sankey"))?;
        c.events.validate().map_err(|e| e.with_details("conversion.events"))?;
        Ok(())
    }

    fn validate_product(&self) -> AnalyticsResult<()> {
        let p = &self.product;
        if let Some(bad) = p
            .brands
            .iter()
            .find(|b| !(b.sales.is_finite() && b.sales >= 0.0))
        {
            return Err(AnalyticsError::configuration(format!(
                "brand '{}' has invalid sales {}",
                bad.name, bad.sales
            )));
        }
        if p.price_max == 0 || p.volume_max == 0 {
            return Err(AnalyticsError::configuration(
                "price sensitivity bounds must be positive",
            ));
        }
        Ok(())
    }

    fn validate_prediction(&self) -> AnalyticsResult<()> {
        let p = &self.prediction;
        if p.history_days == 0 {
            return Err(AnalyticsError::configuration("prediction needs at least one historical day"));
        }
        p.history_range()
            .map_err(|e| AnalyticsError::configuration(e.to_string()).with_details("prediction.history"))?;
        p.history.validate().map_err(|e| e.with_details("prediction.history"))?;
        p.forecast.validate().map_err(|e| e.with_details("prediction.forecast"))?;
        Ok(())
    }
}

fn october_2019(day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(2019, 10, day).unwrap_or_default()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalyticsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.dashboard.default_range().unwrap().len_days(), 31);
        assert_eq!(config.product.brands.len(), 10);
        assert_eq!(config.product.word_cloud.len(), 32);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AnalyticsConfig::from_toml_str(
            r#"
            [dashboard]
            gmv = 1000
            default_start = "2024-01-01"
            default_end = "2024-01-10"

            [random]
            seed = 99
            "#,
        )
        .unwrap();

        assert_eq!(config.dashboard.gmv, 1000.0);
        assert_eq!(config.dashboard.default_range().unwrap().len_days(), 10);
        assert_eq!(config.dashboard.pv, 8_580_000);
        assert_eq!(config.random.seed, Some(99));
        assert_eq!(config.conversion.funnel.stages.len(), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        let err = AnalyticsConfig::from_toml_str("[dashboard\ngmv = ").unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration { .. }));
    }

    #[test]
    fn test_bad_date_in_toml_is_rejected() {
        assert!(AnalyticsConfig::from_toml_str("[dashboard]\ndefault_start = \"2019-02-30\"").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_proportions() {
        let mut config = AnalyticsConfig::default();
        config.user_insight.segments.buckets[0].proportion = 0.5;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration { .. }));
        assert_eq!(err.context().details.as_deref(), Some("user_insight.segments"));
    }

    #[test]
    fn test_validate_rejects_rate_count_mismatch() {
        let mut config = AnalyticsConfig::default();
        config.conversion.funnel.retention_rates.pop();
        assert!(config.validate().is_err());

        let mut config = AnalyticsConfig::default();
        config.conversion.sankey.drop_rates[0] = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_default_range() {
        let mut config = AnalyticsConfig::default();
        config.dashboard.default_start = DateLabel::parse("2019-11-01").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_jitter() {
        let mut config = AnalyticsConfig::default();
        config.dashboard.metric_jitter = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_short_range_limit() {
        let mut config = AnalyticsConfig::default();
        config.dashboard.max_range_days = 30;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AnalyticsError::Configuration { .. }));
        config.dashboard.max_range_days = 31;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_check_range_limit() {
        let d = DashboardConfig::default();
        let year = DateRange::parse("2024-01-01", "2024-12-31").unwrap();
        assert!(d.check_range(&year).is_ok());
        let long = DateRange::parse("2024-01-01", "2025-01-01").unwrap();
        assert!(d.check_range(&long).unwrap_err().is_client_error());
    }

    #[test]
    fn test_history_range() {
        let config = PredictionConfig::default();
        let range = config.history_range().unwrap();
        assert_eq!(range.start.to_string(), "2019-10-25");
        assert_eq!(range.end.to_string(), "2019-10-31");
    }

    #[test]
    fn test_seeded_source_replays() {
        use rand::Rng;
        let source = RandomSource::Seeded(5);
        let a: u64 = source.rng().gen();
        let b: u64 = source.rng().gen();
        assert_eq!(a, b);
        assert_eq!(source.to_string(), "seeded(5)");
    }
}
