use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::domain::interval::TimeUnit;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast when a Jira ticket will be done, based on the team's history
    Forecast {
        /// Path to forecast config YAML
        #[arg(short, long)]
        config: String,
        /// Key of the ticket to forecast, e.g. ABC-123
        #[arg(short, long)]
        ticket: String,
        /// Board holding the ticket; overrides board_id from the config
        #[arg(short, long)]
        board: Option<String>,
        /// Post the forecast as a comment on the ticket
        #[arg(long)]
        comment: bool,
        /// Optional output YAML file with the full forecast
        #[arg(short, long)]
        output: Option<String>,
        /// Optional PNG histogram of the simulation results
        #[arg(long)]
        histogram: Option<String>,
        /// Seed for reproducible simulations
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Forecast every ticket carrying a label, on each board it sits on
    ForecastLabelled {
        /// Path to forecast config YAML
        #[arg(short, long)]
        config: String,
        /// Label marking the tickets to forecast
        #[arg(short, long, default_value = "forecast")]
        label: String,
        /// Post each forecast as a comment on its ticket
        #[arg(long)]
        comment: bool,
        /// Seed for reproducible simulations
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Get resolved tickets per time interval from Jira and serialize to YAML
    GetThroughput {
        /// Path to forecast config YAML
        #[arg(short, long)]
        config: String,
        /// Board used to infer project ids when the config has none
        #[arg(short, long)]
        board: Option<String>,
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Forecast from a throughput YAML file without contacting Jira
    Simulate {
        /// Throughput YAML file
        #[arg(short = 'f', long)]
        throughput: String,
        /// Number of tickets to complete, including the target ticket
        #[arg(short = 't', long)]
        ticket_target: u64,
        /// 1 bug created for every N other tickets
        #[arg(long)]
        bug_ratio: Option<f64>,
        /// 1 new ticket created for every N tickets resolved
        #[arg(long)]
        discovery_ratio: Option<f64>,
        /// Number of simulation trials
        #[arg(short = 'n', long, default_value_t = 1000)]
        iterations: usize,
        /// Confidence threshold in percent
        #[arg(long, default_value_t = 80.0)]
        confidence: f64,
        /// Length of one time interval
        #[arg(long, default_value_t = 2)]
        time_length: u64,
        /// Unit of the time interval length
        #[arg(long, value_enum, default_value_t = TimeUnit::Weeks)]
        time_unit: TimeUnit,
        /// Seed for reproducible simulations
        #[arg(long)]
        seed: Option<u64>,
        /// Optional output YAML file with the full forecast
        #[arg(short, long)]
        output: Option<String>,
        /// Optional PNG histogram of the simulation results
        #[arg(long)]
        histogram: Option<String>,
    },
    /// Plot resolved tickets per interval from YAML into a PNG chart
    PlotThroughput {
        /// Throughput YAML file
        #[arg(short, long)]
        input: String,
        /// Output PNG file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_uses_default_trials_and_interval() {
        let args = CliArgs::parse_from([
            "ticket-forecast",
            "simulate",
            "-f",
            "throughput.yaml",
            "-t",
            "12",
        ]);

        if let Commands::Simulate {
            iterations,
            confidence,
            time_length,
            time_unit,
            ticket_target,
            ..
        } = args.command
        {
            assert_eq!(iterations, 1000);
            assert_eq!(confidence, 80.0);
            assert_eq!(time_length, 2);
            assert_eq!(time_unit, TimeUnit::Weeks);
            assert_eq!(ticket_target, 12);
        } else {
            panic!("expected simulate command");
        }
    }

    #[test]
    fn forecast_parses_ticket_and_flags() {
        let args = CliArgs::parse_from([
            "ticket-forecast",
            "forecast",
            "-c",
            "config.yaml",
            "-t",
            "ABC-123",
            "-b",
            "74",
            "--comment",
            "--seed",
            "7",
        ]);

        if let Commands::Forecast {
            ticket,
            board,
            comment,
            seed,
            output,
            ..
        } = args.command
        {
            assert_eq!(ticket, "ABC-123");
            assert_eq!(board.as_deref(), Some("74"));
            assert!(comment);
            assert_eq!(seed, Some(7));
            assert_eq!(output, None);
        } else {
            panic!("expected forecast command");
        }
    }

    #[test]
    fn forecast_labelled_defaults_to_forecast_label() {
        let args = CliArgs::parse_from(["ticket-forecast", "forecast-labelled", "-c", "config.yaml"]);

        if let Commands::ForecastLabelled { label, comment, .. } = args.command {
            assert_eq!(label, "forecast");
            assert!(!comment);
        } else {
            panic!("expected forecast-labelled command");
        }
    }

    #[test]
    fn simulate_accepts_days_as_time_unit() {
        let args = CliArgs::parse_from([
            "ticket-forecast",
            "simulate",
            "-f",
            "throughput.yaml",
            "-t",
            "3",
            "--time-unit",
            "days",
        ]);

        assert!(matches!(
            args.command,
            Commands::Simulate {
                time_unit: TimeUnit::Days,
                ..
            }
        ));
    }
}
