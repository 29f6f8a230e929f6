use serde::{Deserialize, Serialize};

use super::date::DateLabel;

/// One labelled, non-negative observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint<L> {
    pub label: L,
    pub value: u64,
}

impl<L> SeriesPoint<L> {
    pub fn new(label: L, value: u64) -> Self {
        Self { label, value }
    }
}

/// Named, ordered sequence of points sharing one label axis.
///
/// Insertion order is the temporal (or categorical) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series<L> {
    pub name: String,
    pub points: Vec<SeriesPoint<L>>,
}

impl<L> Series<L> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    pub fn with_points(name: impl Into<String>, points: Vec<SeriesPoint<L>>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn push(&mut self, label: L, value: u64) {
        self.points.push(SeriesPoint::new(label, value));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesPoint<L>> {
        self.points.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.points.iter().map(|p| &p.label)
    }

    pub fn values(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn last(&self) -> Option<&SeriesPoint<L>> {
        self.points.last()
    }

    /// Sum of all values, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.points.iter().fold(0u64, |acc, p| acc.saturating_add(p.value))
    }
}

/// Lower/upper bounds aligned index-for-index with a forecast series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBand {
    pub lower: Series<DateLabel>,
    pub upper: Series<DateLabel>,
}

impl ConfidenceBand {
    /// True when the band is aligned with `forecast` and
    /// `lower[i] <= forecast[i] <= upper[i]` holds at every index.
    pub fn brackets(&self, forecast: &Series<DateLabel>) -> bool {
        if self.lower.len() != forecast.len() || self.upper.len() != forecast.len() {
            return false;
        }
        forecast
            .iter()
            .zip(self.lower.iter())
            .zip(self.upper.iter())
            .all(|((f, lo), hi)| {
                lo.label == f.label && hi.label == f.label && lo.value <= f.value && f.value <= hi.value
            })
    }
}

/// Forward-looking series plus its confidence band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    pub series: Series<DateLabel>,
    pub band: ConfidenceBand,
}
