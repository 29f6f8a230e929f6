//! Per-page report assembly.
//!
//! [`AggregationFacade`] owns the validated configuration and composes the
//! generators into the payload of each dashboard page. It holds no mutable
//! state; every call takes its own random source, so one facade can serve
//! concurrent requests.

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;

use super::activity::ActivityMatrixGenerator;
use super::calendar::HolidayCalendar;
use super::flow::build_flow_graph;
use super::forecast::ForecastEngine;
use super::funnel::build_funnel;
use super::segmentation::segment;
use super::trends::TrendSynthesizer;
use crate::api::{
    BrandTop10, CategorySale, ConversionData, DashboardData, DashboardMetrics, ForecastData,
    HistoricalData, PredictionData, ProductData, PvUvTrend, SankeyData, UserInsightData,
    WordCloudEntry,
};
use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::models::DateRange;
use crate::routes::conversion::{funnel_entries, segment_entries};
use crate::routes::dashboard::heatmap_triples;

/// Number of brands in the ranking chart.
pub const TOP_BRANDS: usize = 10;

#[derive(Debug, Clone)]
pub struct AggregationFacade {
    config: Arc<AnalyticsConfig>,
}

impl AggregationFacade {
    /// Wrap an already validated configuration.
    pub fn new(config: Arc<AnalyticsConfig>) -> Self {
        Self { config }
    }

    /// Validate `config` and wrap it.
    pub fn from_config(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self::new(Arc::new(config)))
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Dashboard bundle for `range`, or for the configured default period.
    ///
    /// Without a range the top-line metrics are the configured constants.
    /// With one they are scaled to the range length and jittered, and the
    /// trend covers exactly the requested days.
    pub fn build_dashboard<R: Rng + ?Sized>(
        &self,
        range: Option<DateRange>,
        rng: &mut R,
    ) -> AnalyticsResult<DashboardData> {
        let d = &self.config.dashboard;
        let default_range = d.default_range()?;

        let (period, metrics) = match range {
            Some(range) => {
                d.check_range(&range)
                    .map_err(|e| e.with_operation("build_dashboard"))?;
                let metrics = self.scale_metrics(range.len_days(), default_range.len_days(), rng);
                (range, metrics)
            }
            None => (
                default_range,
                DashboardMetrics {
                    gmv: d.gmv,
                    pv: d.pv,
                    uv: d.uv,
                },
            ),
        };

        let trend = TrendSynthesizer::new(&d.trend, &self.config.calendar)
            .synthesize_range(&period, rng)
            .map_err(|e| e.with_operation("build_dashboard"))?;
        let heatmap = ActivityMatrixGenerator::new(&d.activity).generate(rng);

        log::debug!(
            "dashboard for {} ({} days, pv {}, trend total {}, peak hour {:?})",
            period,
            period.len_days(),
            metrics.pv,
            trend.primary.total(),
            heatmap.peak_hour()
        );

        Ok(DashboardData {
            metrics,
            pvuv_trend: PvUvTrend::from(trend),
            category_sales: d
                .category_sales
                .iter()
                .map(|c| CategorySale {
                    name: c.name.clone(),
                    value: c.value,
                })
                .collect(),
            activity_heatmap: Some(heatmap_triples(&heatmap)),
        })
    }

    fn scale_metrics<R: Rng + ?Sized>(
        &self,
        days: u64,
        default_days: u64,
        rng: &mut R,
    ) -> DashboardMetrics {
        let d = &self.config.dashboard;
        let factor = days as f64 / default_days.max(1) as f64;
        let mut jitter = || {
            if d.metric_jitter > 0.0 {
                1.0 + rng.gen_range(-d.metric_jitter..d.metric_jitter)
            } else {
                1.0
            }
        };

        let gmv = (d.gmv * factor * jitter() * 100.0).round() / 100.0;
        let pv = (d.pv as f64 * factor * jitter()).round() as u64;
        let uv = (d.uv as f64 * factor * jitter()).round() as u64;
        DashboardMetrics { gmv, pv, uv }
    }

    /// Funnel, navigation flow and event-type distribution. Deterministic.
    pub fn build_conversion(&self) -> AnalyticsResult<ConversionData> {
        let c = &self.config.conversion;
        let funnel = build_funnel(&c.funnel.stages, c.funnel.top_volume, &c.funnel.retention_rates)
            .map_err(|e| e.with_operation("build_conversion"))?;
        let graph = build_flow_graph(&c.sankey.stages, &c.sankey.drop_rates, c.sankey.total, &c.sankey.sink)
            .map_err(|e| e.with_operation("build_conversion"))?;
        let events = segment(c.events.total, &c.events.proportions(), &c.events.names())
            .map_err(|e| e.with_operation("build_conversion"))?;

        log::debug!(
            "conversion: {} funnel stages (step rates {:?}, overall {:.4}), {} flow links, {} converted",
            funnel.len(),
            funnel.step_rates(),
            funnel.overall_conversion(),
            graph.edges.len(),
            graph.converted()
        );

        Ok(ConversionData {
            funnel: funnel_entries(funnel),
            sankey: SankeyData::from(graph),
            event_distribution: segment_entries(events),
        })
    }

    /// Brand ranking, category word cloud and a random price/volume scatter.
    pub fn build_product<R: Rng + ?Sized>(&self, rng: &mut R) -> ProductData {
        let p = &self.config.product;

        let mut brands: Vec<_> = p.brands.iter().collect();
        brands.sort_by(|a, b| b.sales.partial_cmp(&a.sales).unwrap_or(Ordering::Equal));
        brands.truncate(TOP_BRANDS);

        let price_sensitivity = (0..p.price_points)
            .map(|_| [rng.gen_range(0..p.price_max), rng.gen_range(0..p.volume_max)])
            .collect();

        ProductData {
            brand_top10: BrandTop10 {
                brands: brands.iter().map(|b| b.name.clone()).collect(),
                sales: brands.iter().map(|b| b.sales).collect(),
            },
            category_word_cloud: p
                .word_cloud
                .iter()
                .map(|w| WordCloudEntry {
                    name: w.name.clone(),
                    value: w.value,
                })
                .collect(),
            price_sensitivity,
        }
    }

    /// RFM segmentation of the configured population. Deterministic.
    pub fn build_user_insight(&self) -> AnalyticsResult<UserInsightData> {
        let s = &self.config.user_insight.segments;
        let segmentation = segment(s.total, &s.proportions(), &s.names())
            .map_err(|e| e.with_operation("build_user_insight"))?;
        Ok(UserInsightData {
            user_segmentation: segment_entries(segmentation),
        })
    }

    /// Recent history and the forecast that continues it.
    pub fn build_prediction<R: Rng + ?Sized>(&self, rng: &mut R) -> AnalyticsResult<PredictionData> {
        let p = &self.config.prediction;
        let range = p.history_range()?;
        let no_holidays = HolidayCalendar::none();

        let history = TrendSynthesizer::new(&p.history, &no_holidays)
            .synthesize_range(&range, rng)
            .map_err(|e| e.with_operation("build_prediction"))?;
        let forecast = ForecastEngine::new(&p.forecast)
            .forecast(&history.primary, p.horizon_days, rng)
            .map_err(|e| e.with_operation("build_prediction"))?;

        log::debug!(
            "prediction: {} historical days, {} forecast days",
            history.primary.len(),
            forecast.series.len()
        );

        Ok(PredictionData {
            historical: HistoricalData::from(&history.primary),
            forecast: ForecastData::from(forecast),
        })
    }
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod aggregation_tests;
