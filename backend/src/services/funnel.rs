//! Conversion funnel construction.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{Funnel, FunnelStage};

/// Slack for products like `100 * 0.29` that land just under an integer.
const FLOOR_EPSILON: f64 = 1e-9;

/// Check that there is one rate per stage transition and every rate is in `(0, 1]`.
pub fn validate_retention_rates(stage_count: usize, retention_rates: &[f64]) -> AnalyticsResult<()> {
    if stage_count == 0 {
        return Err(AnalyticsError::configuration("funnel needs at least one stage")
            .with_component("funnel"));
    }
    if retention_rates.len() != stage_count - 1 {
        return Err(AnalyticsError::configuration(format!(
            "{} stages need {} retention rates, got {}",
            stage_count,
            stage_count - 1,
            retention_rates.len()
        ))
        .with_component("funnel"));
    }
    if let Some((i, rate)) = retention_rates
        .iter()
        .enumerate()
        .find(|(_, r)| !(r.is_finite() && **r > 0.0 && **r <= 1.0))
    {
        return Err(AnalyticsError::configuration(format!(
            "retention rate #{} = {} is outside (0, 1]",
            i, rate
        ))
        .with_component("funnel"));
    }
    Ok(())
}

/// Build a funnel where each stage keeps `floor(previous * rate)` users.
pub fn build_funnel<S: AsRef<str>>(
    stage_names: &[S],
    top_volume: u64,
    retention_rates: &[f64],
) -> AnalyticsResult<Funnel> {
    validate_retention_rates(stage_names.len(), retention_rates)
        .map_err(|e| e.with_operation("build_funnel"))?;

    let mut stages = Vec::with_capacity(stage_names.len());
    let mut volume = top_volume;
    for (i, name) in stage_names.iter().enumerate() {
        if i > 0 {
            let kept = (volume as f64 * retention_rates[i - 1] + FLOOR_EPSILON).floor() as u64;
            volume = kept.min(volume);
        }
        stages.push(FunnelStage {
            name: name.as_ref().to_string(),
            volume,
        });
    }
    Ok(Funnel { stages })
}
