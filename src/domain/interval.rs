use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const DAYS_IN_WEEK: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    #[default]
    Weeks,
    Days,
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Weeks => write!(f, "weeks"),
            TimeUnit::Days => write!(f, "days"),
        }
    }
}

/// Length of one forecast time interval, e.g. a two week sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalLength {
    pub length: u64,
    pub unit: TimeUnit,
}

impl IntervalLength {
    pub fn new(length: u64, unit: TimeUnit) -> Self {
        Self { length, unit }
    }

    pub fn in_days(&self) -> u64 {
        match self.unit {
            TimeUnit::Weeks => self.length * DAYS_IN_WEEK,
            TimeUnit::Days => self.length,
        }
    }
}

impl fmt::Display for IntervalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.length, self.unit)
    }
}

pub fn weeks_to_days(weeks: u64) -> u64 {
    weeks * DAYS_IN_WEEK
}
