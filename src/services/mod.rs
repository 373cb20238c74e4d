pub mod data_source;
pub mod forecast_config;
pub mod forecast_runner;
pub mod histogram;
pub mod index_sampler;
pub mod jira_api;
pub mod prediction_report;
pub mod simulation;
pub mod throughput_plot;
pub mod throughput_yaml;
pub mod ticket_target;
