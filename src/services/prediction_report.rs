use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::prediction::{OutcomeLine, PredictionReport, SimulationResult, ThresholdResult};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("number of trials must be greater than zero")]
    NoTrials,
}

/// Builds the confidence report for a set of simulation outcomes.
///
/// Outcomes are visited in ascending order of intervals. The threshold result is
/// the first outcome whose cumulative percentage reaches
/// `confidence_threshold_percent`, or `None` if the threshold is never reached.
pub fn build_prediction_report(
    low_ticket_target: u64,
    high_ticket_target: u64,
    simulation: &SimulationResult,
    num_trials: usize,
    confidence_threshold_percent: f64,
    interval_length_days: u64,
) -> Result<PredictionReport, ReportError> {
    if num_trials == 0 {
        return Err(ReportError::NoTrials);
    }

    // Number of trials that arrived at each distinct result. If 3 trials predicted
    // 17 intervals and 5 predicted 18, this holds {17: 3, 18: 5}.
    let mut trials_predicting: BTreeMap<u64, usize> = BTreeMap::new();
    for intervals in simulation.trials() {
        *trials_predicting.entry(*intervals).or_insert(0) += 1;
    }

    let mut outcomes = Vec::with_capacity(trials_predicting.len());
    let mut result_above_threshold: Option<ThresholdResult> = None;
    let mut trials_so_far = 0usize;

    for (intervals, trials) in trials_predicting {
        trials_so_far += trials;
        let percentage = percentage_of(trials, num_trials);
        let cumulative_percentage = percentage_of(trials_so_far, num_trials);
        let days = intervals * interval_length_days;

        if result_above_threshold.is_none() && cumulative_percentage >= confidence_threshold_percent {
            result_above_threshold = Some(ThresholdResult {
                intervals,
                days,
                cumulative_percentage,
            });
        }

        outcomes.push(OutcomeLine {
            intervals,
            days,
            trials,
            percentage,
            cumulative_percentage,
        });
    }

    Ok(PredictionReport {
        low_ticket_target,
        high_ticket_target,
        num_trials,
        confidence_threshold_percent,
        interval_length_days,
        outcomes,
        result_above_threshold,
    })
}

fn percentage_of(count: usize, total: usize) -> f64 {
    count as f64 / total as f64 * 100.0
}
