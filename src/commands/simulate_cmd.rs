use std::process::ExitCode;

use crate::commands::base_commands::Commands;
use crate::commands::forecast_cmd::write_forecast_outputs;
use crate::commands::report_format::format_prediction_report;
use crate::services::forecast_config::ForecastConfig;
use crate::services::forecast_runner::forecast_from_throughput;
use crate::services::index_sampler::seeded_sampler;
use crate::services::throughput_yaml::load_throughput_from_yaml_file;

pub fn simulate_command(cmd: Commands) -> ExitCode {
    let Commands::Simulate {
        throughput,
        ticket_target,
        bug_ratio,
        discovery_ratio,
        iterations,
        confidence,
        time_length,
        time_unit,
        seed,
        output,
        histogram,
    } = cmd
    else {
        return ExitCode::FAILURE;
    };

    let config = ForecastConfig {
        confidence_percentage_threshold: confidence,
        num_simulations: iterations,
        time_length,
        time_unit,
        ticket_target,
        bug_ratio,
        discovery_ratio,
        ..ForecastConfig::default()
    };
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Invalid simulation settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let intervals = match load_throughput_from_yaml_file(&throughput) {
        Ok(intervals) => intervals,
        Err(e) => {
            eprintln!("Failed to load throughput: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut sampler = seeded_sampler(seed);
    let outcome = match forecast_from_throughput(intervals, &settings, &mut sampler) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Failed to simulate by throughput: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", outcome.progress);
    println!("{}", format_prediction_report(&outcome.report));

    match write_forecast_outputs(&outcome, None, output.as_deref(), histogram.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => code,
    }
}
