use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_cmd::load_tracker;
use crate::domain::issue::unique_project_keys;
use crate::services::data_source::IssueTracker;
use crate::services::throughput_yaml::serialize_throughput_to_yaml;

pub async fn get_throughput_command(cmd: Commands) -> ExitCode {
    let Commands::GetThroughput {
        config,
        board,
        output,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let (forecast_config, settings, api_client) = match load_tracker(&config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let project_ids = if settings.project_ids.is_empty() {
        let board_id = board.unwrap_or_else(|| forecast_config.board_id.clone());
        if board_id.is_empty() {
            eprintln!("No project ids configured: set project_ids or board_id in the config");
            return ExitCode::FAILURE;
        }
        match api_client.issues_for_board(&board_id).await {
            Ok(tickets) => unique_project_keys(&tickets),
            Err(e) => {
                eprintln!("Failed to get issues for board {board_id}: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        settings.project_ids.clone()
    };
    if project_ids.is_empty() {
        eprintln!("No project ids could be inferred from the board");
        return ExitCode::FAILURE;
    }

    let throughput = match api_client
        .resolved_per_interval(
            &project_ids,
            settings.interval_length_days(),
            settings.num_days_of_history,
        )
        .await
    {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to get throughput data: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut buffer = Vec::new();
    if let Err(e) = serialize_throughput_to_yaml(&mut buffer, &throughput) {
        eprintln!("Failed to serialize throughput to YAML: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = tokio::fs::write(&output, buffer).await {
        eprintln!("Failed to write output file: {e}");
        return ExitCode::FAILURE;
    }

    println!("Throughput data written to {output}");
    ExitCode::SUCCESS
}
