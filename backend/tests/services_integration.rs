use rand::rngs::StdRng;
use rand::SeedableRng;

use ecom_insight::models::{DateLabel, DateRange};
use ecom_insight::services::{
    build_flow_graph, build_funnel, calendar, segment, ActivityMatrixGenerator, ActivityParams,
    ForecastEngine, ForecastParams, HolidayCalendar, TrendParams, TrendSynthesizer,
};
use ecom_insight::{AggregationFacade, AnalyticsConfig, AnalyticsError};

fn date(s: &str) -> DateLabel {
    DateLabel::parse(s).unwrap()
}

// =========================================================
// Generators
// =========================================================

#[test]
fn test_calendar_expands_across_month_end() {
    let dates = calendar::expand(date("2019-10-30"), date("2019-11-02")).unwrap();
    let labels: Vec<String> = dates.iter().map(|d| d.to_string()).collect();
    assert_eq!(labels, vec!["2019-10-30", "2019-10-31", "2019-11-01", "2019-11-02"]);
}

#[test]
fn test_calendar_rejects_inverted_range() {
    let err = calendar::expand(date("2024-01-02"), date("2024-01-01")).unwrap_err();
    assert!(matches!(err, AnalyticsError::InvalidRange { .. }));
    assert!(err.to_string().starts_with("InvalidRangeError"));
}

#[test]
fn test_trend_pair_over_range() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::default();
    let range = DateRange::parse("2019-09-28", "2019-10-08").unwrap();
    let pair = TrendSynthesizer::new(&params, &holidays)
        .synthesize_range(&range, &mut StdRng::seed_from_u64(11))
        .unwrap();

    assert_eq!(pair.dates.len(), 11);
    assert_eq!(pair.primary.len(), 11);
    assert_eq!(pair.secondary.len(), 11);
    for (p, s) in pair.primary.iter().zip(pair.secondary.iter()) {
        assert_eq!(p.label, s.label);
        assert!(s.value <= p.value);
    }
}

#[test]
fn test_activity_matrix_is_complete() {
    let params = ActivityParams::default();
    let matrix = ActivityMatrixGenerator::new(&params).generate(&mut StdRng::seed_from_u64(12));
    assert!(matrix.is_complete());
    assert_eq!(matrix.len(), 168);
}

#[test]
fn test_reference_funnel() {
    let funnel = build_funnel(&["view", "cart", "order"], 1_000_000, &[0.3, 0.25]).unwrap();
    assert_eq!(funnel.volumes(), vec![1_000_000, 300_000, 75_000]);
    assert!((funnel.overall_conversion() - 0.075).abs() < 1e-12);
}

#[test]
fn test_reference_flow_graph_is_conserved() {
    let graph = build_flow_graph(
        &["Home", "Product List", "Product Detail", "Cart", "Checkout", "Paid"],
        &[0.2, 0.25, 0.5, 1.0 / 3.0, 0.1],
        100_000,
        "Churned",
    )
    .unwrap();
    assert_eq!(graph.converted() + graph.dropped(), 100_000);
    assert!(graph.verify_conservation().is_ok());
}

#[test]
fn test_reference_segmentation() {
    let seg = segment(100_000, &[0.2, 0.3, 0.5], &["A", "B", "C"]).unwrap();
    let counts: Vec<u64> = seg.buckets.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![20_000, 30_000, 50_000]);
}

#[test]
fn test_forecast_continues_history() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::none();
    let mut rng = StdRng::seed_from_u64(13);
    let history = TrendSynthesizer::new(&params, &holidays)
        .synthesize(&calendar::expand_days(date("2019-10-25"), 7).unwrap(), &mut rng);

    let forecast = ForecastEngine::new(&ForecastParams::default())
        .forecast(&history, 7, &mut rng)
        .unwrap();
    assert_eq!(forecast.series.iter().next().unwrap().label, date("2019-11-01"));
    assert!(forecast.band.brackets(&forecast.series));
}

// =========================================================
// Facade
// =========================================================

#[test]
fn test_all_bundles_from_defaults() {
    let facade = AggregationFacade::from_config(AnalyticsConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(21);

    let dashboard = facade.build_dashboard(None, &mut rng).unwrap();
    assert_eq!(dashboard.pvuv_trend.dates.len(), 31);

    let conversion = facade.build_conversion().unwrap();
    assert_eq!(conversion.funnel.len(), 4);

    let product = facade.build_product(&mut rng);
    assert_eq!(product.brand_top10.brands[0], "Apple");

    let users = facade.build_user_insight().unwrap();
    assert_eq!(users.user_segmentation.len(), 5);

    let prediction = facade.build_prediction(&mut rng).unwrap();
    assert_eq!(prediction.historical.pv.len(), 7);
    assert_eq!(prediction.forecast.pv.len(), 7);
}

#[test]
fn test_seeded_bundles_are_reproducible() {
    let facade = AggregationFacade::from_config(AnalyticsConfig::default()).unwrap();
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        (
            facade.build_dashboard(None, &mut rng).unwrap(),
            facade.build_product(&mut rng),
            facade.build_prediction(&mut rng).unwrap(),
        )
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(7).0, run(8).0);
}

#[test]
fn test_single_day_range() {
    let facade = AggregationFacade::from_config(AnalyticsConfig::default()).unwrap();
    let range = DateRange::parse("2020-02-29", "2020-02-29").unwrap();
    let data = facade
        .build_dashboard(Some(range), &mut StdRng::seed_from_u64(22))
        .unwrap();
    assert_eq!(data.pvuv_trend.dates, vec!["2020-02-29"]);
    assert!(data.metrics.pv > 0);
}
