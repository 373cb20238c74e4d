use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use ticket_forecast::commands::base_commands::{CliArgs, Commands};
use ticket_forecast::commands::forecast_cmd::forecast_command;
use ticket_forecast::commands::forecast_labelled_cmd::forecast_labelled_command;
use ticket_forecast::commands::get_throughput_cmd::get_throughput_command;
use ticket_forecast::commands::plot_throughput_cmd::plot_throughput_command;
use ticket_forecast::commands::simulate_cmd::simulate_command;
use ticket_forecast::logging::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = CliArgs::parse();
    match args.command {
        cmd @ Commands::Forecast { .. } => forecast_command(cmd).await,
        cmd @ Commands::ForecastLabelled { .. } => forecast_labelled_command(cmd).await,
        cmd @ Commands::GetThroughput { .. } => get_throughput_command(cmd).await,
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::PlotThroughput { .. } => plot_throughput_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut io::stdout());
            ExitCode::SUCCESS
        }
    }
}
