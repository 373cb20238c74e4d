use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::issue::unique_project_keys;
use crate::domain::prediction::{PredictionReport, SimulationResult};
use crate::domain::ratio::Ratio;
use crate::domain::throughput::{ResolvedInterval, throughput_samples};
use crate::domain::ticket_target::TicketTarget;
use crate::services::data_source::{DataSourceError, IssueTracker};
use crate::services::forecast_config::ForecastSettings;
use crate::services::index_sampler::IndexSampler;
use crate::services::prediction_report::{ReportError, build_prediction_report};
use crate::services::simulation::{SimulationError, simulate};
use crate::services::ticket_target::{BacklogLookup, TicketTargetError, calculate_ticket_target};

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("issue tracker error: {0}")]
    DataSource(#[from] DataSourceError),
    #[error(transparent)]
    TicketTarget(#[from] TicketTargetError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error("no project ids configured and none could be inferred from board {0}")]
    NoProjects(String),
}

/// Everything a forecast produced, ready to print or serialize.
#[derive(Serialize, Debug, Clone)]
pub struct ForecastOutcome {
    pub progress: String,
    pub project_ids: Vec<String>,
    pub bug_ratio: Ratio,
    pub discovery_ratio: Ratio,
    pub ticket_target: TicketTarget,
    pub throughput: Vec<ResolvedInterval>,
    pub simulation: SimulationResult,
    pub report: PredictionReport,
}

/// A ticket and a board it can be forecast on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketOnBoard {
    pub ticket_id: String,
    pub board_id: String,
}

/// Resolves every issue carrying `label` to the boards it sits on.
///
/// An issue on several boards yields one entry per board. Issues on no board
/// are skipped.
pub async fn find_labelled_tickets(
    tracker: &dyn IssueTracker,
    label: &str,
) -> Result<Vec<TicketOnBoard>, ForecastError> {
    let issue_keys = tracker.labelled_issues(label).await?;
    info!(label, issues = issue_keys.len(), "found labelled issues");

    let mut tickets = Vec::new();
    for ticket_id in issue_keys {
        let boards = tracker.boards_containing(&ticket_id).await?;
        if boards.is_empty() {
            warn!(%ticket_id, "labelled issue is not on any board, skipping");
            continue;
        }
        tickets.extend(boards.into_iter().map(|board_id| TicketOnBoard {
            ticket_id: ticket_id.clone(),
            board_id,
        }));
    }
    Ok(tickets)
}

/// Forecasts when `ticket_id` on `board_id` will be done, using the team's
/// history from the issue tracker.
pub async fn run_forecast<S: IndexSampler + ?Sized>(
    tracker: &dyn IssueTracker,
    settings: &ForecastSettings,
    ticket_id: &str,
    board_id: &str,
    sampler: &mut S,
) -> Result<ForecastOutcome, ForecastError> {
    info!(board_id, ticket_id, "counting tickets ahead of target");
    let mut progress = format!("Counting tickets ahead of {ticket_id} in board {board_id}...\n");

    let tickets = tracker.issues_for_board(board_id).await?;

    // Inferring projects from the board undercounts velocity when the team also
    // resolves tickets in projects that are not on the board.
    let project_ids = if settings.project_ids.is_empty() {
        unique_project_keys(&tickets)
    } else {
        settings.project_ids.clone()
    };
    if project_ids.is_empty() {
        return Err(ForecastError::NoProjects(board_id.to_string()));
    }

    let history_days = settings.num_days_of_history;
    let bug_ratio = match settings.bug_ratio_override {
        Some(ratio) => ratio,
        None => tracker.bug_ratio(&project_ids, history_days).await?,
    };
    let discovery_ratio = match settings.discovery_ratio_override {
        Some(ratio) => ratio,
        None => tracker.discovery_ratio(&project_ids, history_days).await?,
    };

    let lookup = BacklogLookup {
        board_id,
        ticket_id,
        tickets: &tickets,
    };
    let ticket_target = calculate_ticket_target(
        bug_ratio,
        discovery_ratio,
        Some(lookup),
        settings.user_supplied_ticket_target,
    )?;
    info!(
        tickets = tickets.len(),
        above_target = ticket_target.number_of_tickets_above_target,
        "located target ticket"
    );

    progress.push_str(&format!(
        "There are {} tickets in board {board_id} that are either in progress or still to do. Of those, {} tickets are ahead of {ticket_id} in priority order.\n",
        tickets.len(),
        ticket_target.number_of_tickets_above_target
    ));
    progress.push_str(&format!("Project interval is {}\n", settings.interval));
    progress.push_str(&format!(
        "The team's past performance will be measured based on tickets in project(s) {} that have been resolved in the last {} project intervals ({history_days} days of history will be considered in total).\n\n",
        project_ids.join(", "),
        settings.num_intervals_of_history()
    ));

    let throughput = tracker
        .resolved_per_interval(&project_ids, settings.interval_length_days(), history_days)
        .await?;
    info!(intervals = throughput.len(), "fetched resolved tickets per interval");

    progress.push_str(&describe_forecast_inputs(
        &throughput,
        bug_ratio,
        discovery_ratio,
        &ticket_target,
    ));
    progress.push_str(&format!("Running {} simulations...\n", settings.num_simulations));

    let (simulation, report) = simulate_and_report(&throughput, &ticket_target, settings, sampler)?;

    Ok(ForecastOutcome {
        progress,
        project_ids,
        bug_ratio,
        discovery_ratio,
        ticket_target,
        throughput,
        simulation,
        report,
    })
}

/// Forecasts from previously exported throughput, without an issue tracker.
///
/// The ratios default to "no correction" when no override is configured.
pub fn forecast_from_throughput<S: IndexSampler + ?Sized>(
    throughput: Vec<ResolvedInterval>,
    settings: &ForecastSettings,
    sampler: &mut S,
) -> Result<ForecastOutcome, ForecastError> {
    let bug_ratio = settings.bug_ratio_override.unwrap_or_else(Ratio::none);
    let discovery_ratio = settings
        .discovery_ratio_override
        .unwrap_or_else(Ratio::none);
    let ticket_target = calculate_ticket_target(
        bug_ratio,
        discovery_ratio,
        None,
        settings.user_supplied_ticket_target,
    )?;

    let mut progress = format!("Project interval is {}\n", settings.interval);
    progress.push_str(&describe_forecast_inputs(
        &throughput,
        bug_ratio,
        discovery_ratio,
        &ticket_target,
    ));
    progress.push_str(&format!("Running {} simulations...\n", settings.num_simulations));

    let (simulation, report) = simulate_and_report(&throughput, &ticket_target, settings, sampler)?;

    Ok(ForecastOutcome {
        progress,
        project_ids: settings.project_ids.clone(),
        bug_ratio,
        discovery_ratio,
        ticket_target,
        throughput,
        simulation,
        report,
    })
}

fn simulate_and_report<S: IndexSampler + ?Sized>(
    throughput: &[ResolvedInterval],
    ticket_target: &TicketTarget,
    settings: &ForecastSettings,
    sampler: &mut S,
) -> Result<(SimulationResult, PredictionReport), ForecastError> {
    info!(
        simulations = settings.num_simulations,
        target = ticket_target.high_ticket_target,
        "running simulations"
    );
    let simulation = simulate(
        &throughput_samples(throughput),
        ticket_target.high_ticket_target as f64,
        settings.num_simulations,
        sampler,
    )?;
    let report = build_prediction_report(
        ticket_target.low_ticket_target,
        ticket_target.high_ticket_target,
        &simulation,
        settings.num_simulations,
        settings.confidence_percentage_threshold,
        settings.interval_length_days(),
    )?;
    Ok((simulation, report))
}

fn describe_forecast_inputs(
    throughput: &[ResolvedInterval],
    bug_ratio: Ratio,
    discovery_ratio: Ratio,
    ticket_target: &TicketTarget,
) -> String {
    let mut lines: Vec<String> = throughput
        .iter()
        // Listing the keys makes saved forecasts comparable over time.
        .map(|interval| {
            format!(
                "Resolved {} tickets in project interval {}: {}",
                interval.resolved,
                interval.interval,
                interval.issues.join(", ")
            )
        })
        .collect();
    lines.push(String::new());

    lines.push(if bug_ratio.is_finite() {
        format!("1 bug ticket created for every {bug_ratio} non-bug tickets.")
    } else {
        "No bug tickets created.".to_string()
    });
    lines.push(if discovery_ratio.is_finite() {
        format!("1 new non-bug ticket created for every {discovery_ratio} tickets resolved.")
    } else {
        "No non-bug tickets created.".to_string()
    });
    lines.push(format!(
        "If the team continues to create new tickets at this rate, we predict the {} outstanding tickets will have grown to {} tickets by the time they have all been completed.",
        ticket_target.low_ticket_target, ticket_target.high_ticket_target
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
