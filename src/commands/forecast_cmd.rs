use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_prediction_report;
use crate::services::data_source::{DataSourceError, IssueTracker};
use crate::services::forecast_config::{ForecastConfig, ForecastSettings};
use crate::services::forecast_runner::{ForecastOutcome, run_forecast};
use crate::services::histogram::write_histogram_png;
use crate::services::index_sampler::seeded_sampler;
use crate::services::jira_api::{AuthData, JiraApiClient};

#[derive(Serialize)]
struct ForecastFile<'a> {
    generated_on: NaiveDate,
    ticket_id: Option<&'a str>,
    #[serde(flatten)]
    outcome: &'a ForecastOutcome,
}

pub async fn forecast_command(cmd: Commands) -> ExitCode {
    let Commands::Forecast {
        config,
        ticket,
        board,
        comment,
        output,
        histogram,
        seed,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let (forecast_config, settings, api_client) = match load_tracker(&config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    let board_id = board.unwrap_or_else(|| forecast_config.board_id.clone());
    if board_id.is_empty() {
        eprintln!("No board given: pass --board or set board_id in the config");
        return ExitCode::FAILURE;
    }

    let mut sampler = seeded_sampler(seed);
    let outcome = match run_forecast(&api_client, &settings, &ticket, &board_id, &mut sampler).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Failed to forecast {ticket}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = format_prediction_report(&outcome.report);
    println!("{}", outcome.progress);
    println!("{report}");

    if let Err(code) = write_forecast_outputs(&outcome, Some(&ticket), output.as_deref(), histogram.as_deref()) {
        return code;
    }

    if comment {
        if let Err(e) = publish_forecast(&api_client, &ticket, &outcome).await {
            eprintln!("Failed to comment on {ticket}: {e}");
            return ExitCode::FAILURE;
        }
        println!("Forecast posted as a comment on {ticket}");
    }

    ExitCode::SUCCESS
}

/// Loads the config and builds a Jira client from it and the environment.
pub(crate) fn load_tracker(
    config: &str,
) -> Result<(ForecastConfig, ForecastSettings, JiraApiClient), ExitCode> {
    let forecast_config = match ForecastConfig::from_yaml_file(config) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to parse forecast config: {e}");
            return Err(ExitCode::FAILURE);
        }
    };
    let settings = match forecast_config
        .validate_for_tracker()
        .and_then(|_| forecast_config.settings())
    {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid forecast config: {e}");
            return Err(ExitCode::FAILURE);
        }
    };

    let auth = match AuthData::from_env() {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("Failed to load Jira auth: {e}");
            return Err(ExitCode::FAILURE);
        }
    };
    match JiraApiClient::new(&forecast_config.base_url, &forecast_config.bug_issue_type, auth) {
        Ok(client) => Ok((forecast_config, settings, client)),
        Err(e) => {
            eprintln!("Failed to create JiraApiClient: {e}");
            Err(ExitCode::FAILURE)
        }
    }
}

pub fn forecast_comment_body(outcome: &ForecastOutcome) -> String {
    format!(
        "*Probabilistic Forecast*\n\n{}\n{}",
        outcome.progress,
        format_prediction_report(&outcome.report)
    )
}

pub async fn publish_forecast(
    tracker: &dyn IssueTracker,
    ticket_id: &str,
    outcome: &ForecastOutcome,
) -> Result<(), DataSourceError> {
    tracker
        .comment_issue(ticket_id, &forecast_comment_body(outcome))
        .await
}

/// Writes the optional YAML dump and histogram of a forecast.
pub(crate) fn write_forecast_outputs(
    outcome: &ForecastOutcome,
    ticket_id: Option<&str>,
    output: Option<&str>,
    histogram: Option<&str>,
) -> Result<(), ExitCode> {
    if let Some(output) = output {
        let file = ForecastFile {
            generated_on: Local::now().date_naive(),
            ticket_id,
            outcome,
        };
        let yaml = match serde_yaml::to_string(&file) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize forecast output: {e}");
                return Err(ExitCode::FAILURE);
            }
        };
        if let Err(e) = std::fs::write(output, yaml) {
            eprintln!("Failed to write forecast output: {e}");
            return Err(ExitCode::FAILURE);
        }
        println!("Forecast written to {output}");
    }

    if let Some(histogram) = histogram {
        if let Err(e) = write_histogram_png(histogram, &outcome.simulation, outcome.report.interval_length_days) {
            eprintln!("Failed to write simulation histogram: {e}");
            return Err(ExitCode::FAILURE);
        }
        println!("Simulation histogram written to {histogram}");
    }

    Ok(())
}
