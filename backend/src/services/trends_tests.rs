use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;

fn label(s: &str) -> DateLabel {
    DateLabel::parse(s).unwrap()
}

fn flat_params() -> TrendParams {
    TrendParams {
        base_min: 100,
        base_max: 101,
        weekend_boost: 10,
        holiday_boost: 1000,
        ..TrendParams::default()
    }
}

#[test]
fn test_boosts_are_additive() {
    let params = flat_params();
    let holidays = HolidayCalendar::default();
    let synth = TrendSynthesizer::new(&params, &holidays);
    let mut rng = StdRng::seed_from_u64(7);

    // Fri 2019-10-04 (holiday), Sat 2019-10-05 (holiday + weekend),
    // Wed 2019-10-09 (plain), Sat 2019-10-12 (weekend)
    let dates = vec![
        label("2019-10-04"),
        label("2019-10-05"),
        label("2019-10-09"),
        label("2019-10-12"),
    ];
    let series = synth.synthesize(&dates, &mut rng);
    assert_eq!(series.values(), vec![1100, 1110, 100, 110]);
    assert_eq!(series.name, "PV");
}

#[test]
fn test_values_within_bounds() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::default();
    let synth = TrendSynthesizer::new(&params, &holidays);
    let mut rng = StdRng::seed_from_u64(42);

    let range = DateRange::parse("2019-09-01", "2019-11-30").unwrap();
    let pair = synth.synthesize_range(&range, &mut rng).unwrap();
    assert_eq!(pair.dates.len(), 91);

    let ceiling = params.base_max + params.weekend_boost + params.holiday_boost;
    for point in pair.primary.iter() {
        assert!(point.value >= params.base_min);
        assert!(point.value < ceiling);
    }
}

#[test]
fn test_secondary_is_fraction_of_primary() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::default();
    let synth = TrendSynthesizer::new(&params, &holidays);
    let mut rng = StdRng::seed_from_u64(3);

    let range = DateRange::parse("2019-10-01", "2019-10-31").unwrap();
    let pair = synth.synthesize_range(&range, &mut rng).unwrap();

    assert_eq!(pair.secondary.len(), pair.primary.len());
    assert_eq!(pair.secondary.name, "UV");
    for (pv, uv) in pair.primary.iter().zip(pair.secondary.iter()) {
        assert_eq!(pv.label, uv.label);
        let low = (pv.value as f64 * params.secondary_ratio_min).floor() as u64;
        let high = (pv.value as f64 * params.secondary_ratio_max).floor() as u64;
        assert!(uv.value >= low, "uv {} below {}", uv.value, low);
        assert!(uv.value <= high, "uv {} above {}", uv.value, high);
    }
}

#[test]
fn test_same_seed_same_series() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::default();
    let synth = TrendSynthesizer::new(&params, &holidays);
    let range = DateRange::parse("2024-01-01", "2024-01-14").unwrap();

    let a = synth
        .synthesize_range(&range, &mut StdRng::seed_from_u64(11))
        .unwrap();
    let b = synth
        .synthesize_range(&range, &mut StdRng::seed_from_u64(11))
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_dates_give_empty_series() {
    let params = TrendParams::default();
    let holidays = HolidayCalendar::default();
    let synth = TrendSynthesizer::new(&params, &holidays);
    let pair = synth.synthesize_pair(Vec::new(), &mut StdRng::seed_from_u64(1));
    assert!(pair.primary.is_empty());
    assert!(pair.secondary.is_empty());
}

#[test]
fn test_validate_params() {
    assert!(TrendParams::default().validate().is_ok());

    let empty_base = TrendParams {
        base_min: 10,
        base_max: 10,
        ..TrendParams::default()
    };
    assert!(empty_base.validate().is_err());

    let bad_ratio = TrendParams {
        secondary_ratio_min: 0.5,
        secondary_ratio_max: 1.5,
        ..TrendParams::default()
    };
    assert!(bad_ratio.validate().is_err());
}

#[test]
fn test_validate_rejects_overflowing_boosts() {
    let params = TrendParams {
        weekend_boost: u64::MAX,
        ..TrendParams::default()
    };
    let err = params.validate().unwrap_err();
    assert!(matches!(err, AnalyticsError::Configuration { .. }));
}

#[test]
fn test_unvalidated_boosts_saturate() {
    let params = TrendParams {
        base_min: 1,
        base_max: 2,
        weekend_boost: u64::MAX,
        holiday_boost: u64::MAX,
        ..TrendParams::default()
    };
    let holidays = HolidayCalendar::default();
    // Sat 2019-10-05 is both a weekend day and a holiday
    let series = TrendSynthesizer::new(&params, &holidays)
        .synthesize(&[label("2019-10-05")], &mut StdRng::seed_from_u64(3));
    assert_eq!(series.values(), vec![u64::MAX]);
}
