//! Exhaustive partition of a population into named buckets (RFM tiers,
//! event types).
//!
//! All buckets but the last take `floor(total * proportion)`; the last one
//! takes whatever is left, so the counts always add up to `total`.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::models::{SegmentBucket, Segmentation};

/// Allowed distance between the proportion sum and 1.0.
pub const PROPORTION_TOLERANCE: f64 = 1e-6;

/// Check lengths, individual proportions and their sum.
pub fn validate_proportions<S: AsRef<str>>(proportions: &[f64], names: &[S]) -> AnalyticsResult<()> {
    if proportions.is_empty() {
        return Err(AnalyticsError::configuration("segmentation needs at least one bucket")
            .with_component("segmentation"));
    }
    if proportions.len() != names.len() {
        return Err(AnalyticsError::configuration(format!(
            "{} proportions but {} bucket names",
            proportions.len(),
            names.len()
        ))
        .with_component("segmentation"));
    }
    if let Some((i, p)) = proportions
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && (0.0..=1.0).contains(*p)))
    {
        return Err(AnalyticsError::configuration(format!(
            "proportion #{} = {} is outside [0, 1]",
            i, p
        ))
        .with_component("segmentation"));
    }
    let sum: f64 = proportions.iter().sum();
    if (sum - 1.0).abs() > PROPORTION_TOLERANCE {
        return Err(AnalyticsError::configuration(format!(
            "proportions sum to {}, expected 1.0",
            sum
        ))
        .with_component("segmentation"));
    }
    Ok(())
}

/// Split `total` across `names` according to `proportions`.
pub fn segment<S: AsRef<str>>(
    total: u64,
    proportions: &[f64],
    names: &[S],
) -> AnalyticsResult<Segmentation> {
    validate_proportions(proportions, names).map_err(|e| e.with_operation("segment"))?;

    let last = names.len() - 1;
    let mut remaining = total;
    let mut buckets = Vec::with_capacity(names.len());
    for (i, (name, proportion)) in names.iter().zip(proportions).enumerate() {
        let count = if i == last {
            remaining
        } else {
            // the tolerance on the sum can let early floors overshoot by a unit or two
            ((total as f64 * proportion).floor() as u64).min(remaining)
        };
        remaining -= count;
        buckets.push(SegmentBucket {
            name: name.as_ref().to_string(),
            count,
        });
    }

    Ok(Segmentation { total, buckets })
}
