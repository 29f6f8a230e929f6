use serde::{Deserialize, Serialize};

/// A named stage and the number of users that reached it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub volume: u64,
}

/// Ordered stage volumes; `volume[i] >= volume[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
}

impl Funnel {
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn volumes(&self) -> Vec<u64> {
        self.stages.iter().map(|s| s.volume).collect()
    }

    /// Whether every stage is at most as large as the one before it.
    pub fn is_non_increasing(&self) -> bool {
        self.stages.windows(2).all(|w| w[0].volume >= w[1].volume)
    }

    /// Fraction of the top stage that reached the last stage.
    pub fn overall_conversion(&self) -> f64 {
        match (self.stages.first(), self.stages.last()) {
            (Some(first), Some(last)) if first.volume > 0 => last.volume as f64 / first.volume as f64,
            _ => 0.0,
        }
    }

    /// Stage-to-stage pass rates, one per adjacent pair.
    pub fn step_rates(&self) -> Vec<f64> {
        self.stages
            .windows(2)
            .map(|w| {
                if w[0].volume > 0 {
                    w[1].volume as f64 / w[0].volume as f64
                } else {
                    0.0
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funnel(volumes: &[u64]) -> Funnel {
        Funnel {
            stages: volumes
                .iter()
                .enumerate()
                .map(|(i, v)| FunnelStage {
                    name: format!("s{}", i),
                    volume: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn test_overall_conversion() {
        let f = funnel(&[1000, 500, 100]);
        assert!((f.overall_conversion() - 0.1).abs() < 1e-12);
        assert_eq!(funnel(&[]).overall_conversion(), 0.0);
        assert_eq!(funnel(&[0, 0]).overall_conversion(), 0.0);
    }

    #[test]
    fn test_step_rates() {
        let f = funnel(&[1000, 500, 100]);
        let rates = f.step_rates();
        assert_eq!(rates.len(), 2);
        assert!((rates[0] - 0.5).abs() < 1e-12);
        assert!((rates[1] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_non_increasing_check() {
        assert!(funnel(&[5, 5, 3, 0]).is_non_increasing());
        assert!(!funnel(&[5, 6]).is_non_increasing());
    }
}
