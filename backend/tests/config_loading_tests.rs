//! Configuration loading from disk.
//!
//! Only `test_load_honours_config_env` touches process environment, so the
//! tests in this binary can run in parallel safely.

use std::io::Write;

use ecom_insight::config::{AnalyticsConfig, ConfigSource, CONFIG_PATH_ENV};
use ecom_insight::AnalyticsError;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_from_file_overrides_tables() {
    let file = write_config(
        r#"
        [calendar]
        rules = []
        dates = ["2024-02-14"]

        [conversion.funnel]
        stages = ["Visit", "Buy"]
        top_volume = 1000
        retention_rates = [0.1]

        [user_insight.segments]
        total = 10
        buckets = [
            { name = "Loyal", proportion = 0.5 },
            { name = "Lapsed", proportion = 0.5 },
        ]
        "#,
    );

    let config = AnalyticsConfig::from_file(file.path()).unwrap();
    assert!(config.calendar.rules.is_empty());
    assert_eq!(config.calendar.dates.len(), 1);
    assert_eq!(config.conversion.funnel.stages, vec!["Visit", "Buy"]);
    assert_eq!(config.user_insight.segments.buckets.len(), 2);
    // untouched sections keep their defaults
    assert_eq!(config.conversion.sankey.sink, "Churned");
    assert_eq!(config.prediction.horizon_days, 7);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = write_config("");
    let config = AnalyticsConfig::from_file(file.path()).unwrap();
    assert_eq!(config, AnalyticsConfig::default());
}

#[test]
fn test_missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = AnalyticsConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, AnalyticsError::Configuration { .. }));
    assert!(err.to_string().starts_with("ConfigurationError"));
}

#[test]
fn test_invalid_tables_fail_validation() {
    let file = write_config(
        r#"
        [conversion.sankey]
        stages = ["Home", "Paid"]
        drop_rates = [0.5, 0.5]
        "#,
    );
    let config = AnalyticsConfig::from_file(file.path()).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_honours_config_env() {
    let file = write_config("[random]\nseed = 314\n");
    std::env::set_var(CONFIG_PATH_ENV, file.path());
    let (config, source) = AnalyticsConfig::load().unwrap();
    assert_eq!(config.random.seed, Some(314));
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));

    let bad = write_config("[prediction]\nhistory_days = 0\n");
    std::env::set_var(CONFIG_PATH_ENV, bad.path());
    assert!(AnalyticsConfig::load().is_err());

    std::env::remove_var(CONFIG_PATH_ENV);
}
