use std::process::ExitCode;

use tracing::error;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_cmd::{load_tracker, publish_forecast};
use crate::commands::report_format::format_prediction_report;
use crate::services::forecast_runner::{find_labelled_tickets, run_forecast};
use crate::services::index_sampler::seeded_sampler;

pub async fn forecast_labelled_command(cmd: Commands) -> ExitCode {
    let Commands::ForecastLabelled {
        config,
        label,
        comment,
        seed,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let (_, settings, api_client) = match load_tracker(&config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let tickets = match find_labelled_tickets(&api_client, &label).await {
        Ok(tickets) => tickets,
        Err(e) => {
            eprintln!("Failed to find tickets labelled {label}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sampler = seeded_sampler(seed);
    let mut failures = 0;
    for ticket in &tickets {
        let (ticket_id, board_id) = (&ticket.ticket_id, &ticket.board_id);
        println!("Forecast for {ticket_id} on board {board_id}");

        // One bad ticket must not hold up the rest of the batch.
        let outcome = match run_forecast(&api_client, &settings, ticket_id, board_id, &mut sampler).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(%ticket_id, %board_id, "forecast failed: {e}");
                eprintln!("Failed to forecast {ticket_id} on board {board_id}: {e}");
                failures += 1;
                continue;
            }
        };
        println!("{}", outcome.progress);
        println!("{}", format_prediction_report(&outcome.report));

        if comment {
            if let Err(e) = publish_forecast(&api_client, ticket_id, &outcome).await {
                eprintln!("Failed to comment on {ticket_id}: {e}");
                failures += 1;
                continue;
            }
            println!("Forecast posted as a comment on {ticket_id}");
        }
        println!();
    }

    println!("Forecast {} labelled ticket(s) on boards.", tickets.len() - failures);
    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
