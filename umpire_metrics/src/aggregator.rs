use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single numeric observation returned by a metrics backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Sample {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            timestamp: None,
        }
    }

    pub fn at(value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            value,
            timestamp: Some(timestamp),
        }
    }
}

impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

/// Reduces a window of samples to the single value a check compares
/// against its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    #[default]
    Avg,
    Sum,
    Min,
    Max,
}

impl Aggregator {
    /// Unknown or missing selectors fall back to `Avg`.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("avg") => Aggregator::Avg,
            Some("sum") => Aggregator::Sum,
            Some("min") => Aggregator::Min,
            Some("max") => Aggregator::Max,
            _ => Aggregator::Avg,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Aggregator::Avg => "avg",
            Aggregator::Sum => "sum",
            Aggregator::Min => "min",
            Aggregator::Max => "max",
        }
    }

    /// Returns `None` for an empty window; callers treat that as "no data".
    pub fn aggregate(&self, samples: &[Sample]) -> Option<f64> {
        let (first, rest) = samples.split_first()?;
        let values = rest.iter().map(|s| s.value);

        let value = match self {
            Aggregator::Avg => {
                let sum: f64 = samples.iter().map(|s| s.value).sum();
                sum / samples.len() as f64
            }
            Aggregator::Sum => samples.iter().map(|s| s.value).sum(),
            Aggregator::Min => values.fold(first.value, f64::min),
            Aggregator::Max => values.fold(first.value, f64::max),
        };

        Some(value)
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
