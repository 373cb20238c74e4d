use thiserror::Error;

use crate::domain::prediction::SimulationResult;
use crate::domain::throughput::ThroughputSample;
use crate::services::index_sampler::IndexSampler;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SimulationError {
    #[error("invalid input: throughput history is empty")]
    EmptyThroughput,
    #[error("invalid input: number of trials must be greater than zero")]
    InvalidTrialCount,
    #[error("invalid input: ticket target must be a finite number")]
    InvalidTicketTarget,
}

/// Runs `num_trials` Monte Carlo trials predicting how many time intervals it
/// takes to complete more than `ticket_target` tickets.
///
/// Each trial resamples the historical throughput with replacement until the
/// completed ticket count exceeds the target and records the number of draws.
pub fn simulate<S: IndexSampler + ?Sized>(
    throughput_samples: &[ThroughputSample],
    ticket_target: f64,
    num_trials: usize,
    sampler: &mut S,
) -> Result<SimulationResult, SimulationError> {
    if throughput_samples.is_empty() {
        return Err(SimulationError::EmptyThroughput);
    }
    if num_trials == 0 {
        return Err(SimulationError::InvalidTrialCount);
    }
    if !ticket_target.is_finite() {
        return Err(SimulationError::InvalidTicketTarget);
    }

    // Zero tickets in every past interval would never reach the target, so
    // every trial predicts zero intervals instead.
    if throughput_samples.iter().all(|sample| *sample == 0) {
        return Ok(SimulationResult(vec![0; num_trials]));
    }

    let mut results = Vec::with_capacity(num_trials);
    for _ in 0..num_trials {
        results.push(simulate_single_trial(throughput_samples, ticket_target, sampler));
    }

    Ok(SimulationResult(results))
}

fn simulate_single_trial<S: IndexSampler + ?Sized>(
    throughput_samples: &[ThroughputSample],
    ticket_target: f64,
    sampler: &mut S,
) -> u64 {
    let mut done: u64 = 0;
    let mut intervals = 0;

    while done as f64 <= ticket_target {
        let index = sampler.next_index(throughput_samples.len());
        done += throughput_samples[index];
        intervals += 1;
    }

    intervals
}
