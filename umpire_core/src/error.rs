use thiserror::Error;

/// Failures a metrics backend can report for a single fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("Metric not found: {0}")]
    MetricNotFound(String),

    #[error("Backend request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::RequestFailed("request timed out".to_string())
        } else {
            SourceError::RequestFailed(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, SourceError>;
