use serde::{Deserialize, Serialize};

/// Number of work items resolved during one time interval.
pub type ThroughputSample = u64;

/// Resolved work items for one historical time interval.
///
/// Interval `1` is the most recent one; higher numbers walk back in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInterval {
    pub interval: usize,
    pub resolved: ThroughputSample,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl ResolvedInterval {
    pub fn new(interval: usize, resolved: ThroughputSample, issues: Vec<String>) -> Self {
        Self {
            interval,
            resolved,
            issues,
        }
    }
}

pub fn throughput_samples(intervals: &[ResolvedInterval]) -> Vec<ThroughputSample> {
    intervals.iter().map(|interval| interval.resolved).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throughput_samples_preserve_interval_order() {
        let intervals = vec![
            ResolvedInterval::new(1, 4, vec!["ABC-1".into()]),
            ResolvedInterval::new(2, 0, vec![]),
            ResolvedInterval::new(3, 7, vec![]),
        ];

        assert_eq!(throughput_samples(&intervals), vec![4, 0, 7]);
    }
}
