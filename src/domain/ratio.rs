use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RatioError {
    #[error("ratio must be a number, got NaN")]
    NotANumber,
    #[error("ratio must be positive, got {0}")]
    NotPositive(f64),
    #[error("ratio is zero: every counted ticket was a new event")]
    Zero,
}

/// "1 event per `value` other events".
///
/// An infinite ratio means the event was never observed and contributes no
/// correction to the ticket target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio(f64);

impl Ratio {
    pub fn new(value: f64) -> Result<Self, RatioError> {
        if value.is_nan() {
            return Err(RatioError::NotANumber);
        }
        if value <= 0.0 {
            return Err(RatioError::NotPositive(value));
        }
        Ok(Self(value))
    }

    pub fn none() -> Self {
        Self(f64::INFINITY)
    }

    /// Builds a ratio from `per` other items observed for `events` occurrences.
    ///
    /// Zero occurrences map to an infinite ratio, including the `0 / 0` case.
    pub fn from_counts(per: u64, events: u64) -> Result<Self, RatioError> {
        if events == 0 {
            return Ok(Self::none());
        }
        if per == 0 {
            return Err(RatioError::Zero);
        }
        Ok(Self(per as f64 / events as f64))
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Number of additional tickets expected for `tickets` tickets of work.
    pub fn correction(&self, tickets: f64) -> f64 {
        if self.is_finite() { tickets / self.0 } else { 0.0 }
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "∞")
        }
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_finite() {
            serializer.serialize_some(&self.0)
        } else {
            serializer.serialize_none()
        }
    }
}
