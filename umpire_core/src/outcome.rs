use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const MISSING_PARAMETERS: &str = "missing parameters";
pub const METRIC_NOT_FOUND: &str = "metric not found";
pub const NO_VALUES: &str = "no values for metric in range";
pub const BACKEND_UNAVAILABLE: &str =
    "connecting to backend metrics service failed with error 'request timed out'";

/// Result of evaluating one check request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Value within bounds, or `None` when an empty window was allowed.
    Passed { value: Option<f64> },
    Failed { value: f64 },
    NoData,
    NotFound,
    BackendUnavailable,
    Invalid,
}

impl CheckOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            CheckOutcome::Passed { .. } => "passed",
            CheckOutcome::Failed { .. } => "failed",
            CheckOutcome::NoData => "no_data",
            CheckOutcome::NotFound => "not_found",
            CheckOutcome::BackendUnavailable => "backend_unavailable",
            CheckOutcome::Invalid => "invalid",
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            CheckOutcome::Passed { value } => *value,
            CheckOutcome::Failed { value } => Some(*value),
            _ => None,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, CheckOutcome::Passed { .. })
    }

    /// HTTP status a probe sees for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            CheckOutcome::Passed { .. } => 200,
            CheckOutcome::Failed { .. } => 500,
            CheckOutcome::NoData => 404,
            CheckOutcome::NotFound => 404,
            CheckOutcome::BackendUnavailable => 503,
            CheckOutcome::Invalid => 400,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            CheckOutcome::Passed { value: Some(value) } | CheckOutcome::Failed { value } => {
                json!({ "value": reported_value(*value) })
            }
            CheckOutcome::Passed { value: None } | CheckOutcome::NoData => {
                json!({ "error": NO_VALUES })
            }
            CheckOutcome::NotFound => json!({ "error": METRIC_NOT_FOUND }),
            CheckOutcome::BackendUnavailable => json!({ "error": BACKEND_UNAVAILABLE }),
            CheckOutcome::Invalid => json!({ "error": MISSING_PARAMETERS }),
        }
    }
}

/// JSON has no infinities, so an overflowed aggregate is reported as the
/// largest finite value of the same sign.
fn reported_value(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(f64::MIN, f64::MAX)
}
