use std::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::interval::{IntervalLength, TimeUnit, weeks_to_days};
use crate::domain::ratio::{Ratio, RatioError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("config is missing {0}")]
    Missing(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{history_days} days of history do not cover one {interval_days} day interval")]
    HistoryShorterThanInterval { history_days: u64, interval_days: u64 },
    #[error("invalid {name}: {source}")]
    InvalidRatio {
        name: &'static str,
        source: RatioError,
    },
}

/// Forecast settings read from a YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub base_url: String,
    pub board_id: String,
    /// Projects measuring the team's performance. Inferred from the board when empty.
    pub project_ids: Vec<String>,
    pub bug_issue_type: String,
    pub num_weeks_of_history: u64,
    pub confidence_percentage_threshold: f64,
    pub num_simulations: usize,
    pub time_length: u64,
    pub time_unit: TimeUnit,
    pub ticket_target: u64,
    pub bug_ratio: Option<f64>,
    pub discovery_ratio: Option<f64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            board_id: String::new(),
            project_ids: Vec::new(),
            bug_issue_type: "Bug".to_string(),
            num_weeks_of_history: 10,
            confidence_percentage_threshold: 80.0,
            num_simulations: 1000,
            time_length: 2,
            time_unit: TimeUnit::Weeks,
            ticket_target: 60,
            bug_ratio: None,
            discovery_ratio: None,
        }
    }
}

impl ForecastConfig {
    pub fn from_yaml_file(filepath: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(filepath)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: ForecastConfig = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Checks the values needed to forecast against an issue tracker.
    pub fn validate_for_tracker(&self) -> Result<(), ConfigError> {
        if self.base_url.is_empty() {
            return Err(ConfigError::Missing("base_url"));
        }
        let settings = self.settings()?;
        // No history interval fits in the window, so there is nothing to resample.
        if settings.num_days_of_history < settings.interval_length_days() {
            return Err(ConfigError::HistoryShorterThanInterval {
                history_days: settings.num_days_of_history,
                interval_days: settings.interval_length_days(),
            });
        }
        Ok(())
    }

    pub fn settings(&self) -> Result<ForecastSettings, ConfigError> {
        if self.num_simulations == 0 {
            return Err(ConfigError::NotPositive("num_simulations"));
        }
        if self.time_length == 0 {
            return Err(ConfigError::NotPositive("time_length"));
        }
        if self.num_weeks_of_history == 0 {
            return Err(ConfigError::NotPositive("num_weeks_of_history"));
        }

        Ok(ForecastSettings {
            project_ids: self
                .project_ids
                .iter()
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
            num_days_of_history: weeks_to_days(self.num_weeks_of_history),
            confidence_percentage_threshold: self.confidence_percentage_threshold,
            num_simulations: self.num_simulations,
            interval: IntervalLength::new(self.time_length, self.time_unit),
            user_supplied_ticket_target: self.ticket_target,
            bug_ratio_override: ratio_override("bug_ratio", self.bug_ratio)?,
            discovery_ratio_override: ratio_override("discovery_ratio", self.discovery_ratio)?,
        })
    }
}

fn ratio_override(name: &'static str, value: Option<f64>) -> Result<Option<Ratio>, ConfigError> {
    value
        .map(Ratio::new)
        .transpose()
        .map_err(|source| ConfigError::InvalidRatio { name, source })
}

/// Validated forecast parameters, passed explicitly into the forecast runner.
#[derive(Debug, Clone)]
pub struct ForecastSettings {
    pub project_ids: Vec<String>,
    pub num_days_of_history: u64,
    pub confidence_percentage_threshold: f64,
    pub num_simulations: usize,
    pub interval: IntervalLength,
    pub user_supplied_ticket_target: u64,
    pub bug_ratio_override: Option<Ratio>,
    pub discovery_ratio_override: Option<Ratio>,
}

impl ForecastSettings {
    pub fn interval_length_days(&self) -> u64 {
        self.interval.in_days()
    }

    pub fn num_intervals_of_history(&self) -> u64 {
        self.num_days_of_history / self.interval_length_days()
    }
}
