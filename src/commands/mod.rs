pub mod base_commands;
pub mod forecast_cmd;
pub mod forecast_labelled_cmd;
pub mod get_throughput_cmd;
pub mod plot_throughput_cmd;
pub mod report_format;
pub mod simulate_cmd;
