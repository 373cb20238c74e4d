use serde::Serialize;

/// Number of time intervals each simulation trial needed to pass the ticket target.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct SimulationResult(pub Vec<u64>);

impl SimulationResult {
    pub fn trials(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OutcomeLine {
    pub intervals: u64,
    pub days: u64,
    pub trials: usize,
    pub percentage: f64,
    pub cumulative_percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ThresholdResult {
    pub intervals: u64,
    pub days: u64,
    pub cumulative_percentage: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub low_ticket_target: u64,
    pub high_ticket_target: u64,
    pub num_trials: usize,
    pub confidence_threshold_percent: f64,
    pub interval_length_days: u64,
    /// One line per distinct outcome, in ascending order of intervals.
    pub outcomes: Vec<OutcomeLine>,
    /// `None` when the confidence threshold is never reached.
    pub result_above_threshold: Option<ThresholdResult>,
}

impl PredictionReport {
    pub fn outcome(&self, intervals: u64) -> Option<&OutcomeLine> {
        self.outcomes.iter().find(|line| line.intervals == intervals)
    }
}
