use serde::{Deserialize, Serialize};

/// A named share of a population.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentBucket {
    pub name: String,
    pub count: u64,
}

/// Non-overlapping, exhaustive partition of `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    pub total: u64,
    pub buckets: Vec<SegmentBucket>,
}

impl Segmentation {
    /// Sum of all bucket counts.
    pub fn sum(&self) -> u64 {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Whether the buckets add up to the declared total.
    pub fn is_exact(&self) -> bool {
        self.sum() == self.total
    }

    pub fn get(&self, name: &str) -> Option<&SegmentBucket> {
        self.buckets.iter().find(|b| b.name == name)
    }
}
