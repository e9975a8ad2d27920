use crate::{error::*, source::MetricSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use umpire_metrics::Sample;

pub const DEFAULT_LIBRATO_URL: &str = "https://metrics-api.librato.com";

/// Resolution (seconds) requested from Librato.
const RESOLUTION_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct LibratoMeasurement {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub measure_time: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibratoResponse {
    /// Measurements keyed by source name.
    #[serde(default)]
    pub measurements: BTreeMap<String, Vec<LibratoMeasurement>>,
}

#[derive(Debug, Clone)]
pub struct LibratoCredentials {
    pub email: String,
    pub token: String,
}

pub struct LibratoSource {
    base_url: String,
    credentials: LibratoCredentials,
    client: reqwest::Client,
}

impl LibratoSource {
    pub fn new(
        base_url: impl Into<String>,
        credentials: LibratoCredentials,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            client,
        })
    }

    /// Metric endpoint URL. The name is a single percent-encoded path segment.
    pub fn metric_url(&self, metric: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            SourceError::RequestFailed(format!("invalid Librato url '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                SourceError::RequestFailed(format!("invalid Librato url '{}'", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v1", "metrics", metric]);
        Ok(url)
    }

    /// Flatten every source's measurements, sources in name order.
    pub fn parse_measurements(body: &str) -> Result<Vec<Sample>> {
        let response: LibratoResponse = serde_json::from_str(body).map_err(|e| {
            SourceError::RequestFailed(format!("invalid Librato response: {}", e))
        })?;

        let samples = response
            .measurements
            .into_values()
            .flatten()
            .filter_map(|m| {
                let value = m.value?;
                Some(
                    match m.measure_time.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
                        Some(at) => Sample::at(value, at),
                        None => Sample::new(value),
                    },
                )
            })
            .collect();

        Ok(samples)
    }
}

#[async_trait]
impl MetricSource for LibratoSource {
    async fn fetch(&self, metric: &str, range_secs: u64) -> Result<Vec<Sample>> {
        let url = self.metric_url(metric)?;
        let range = i64::try_from(range_secs).unwrap_or(i64::MAX);
        let start_time = Utc::now().timestamp().saturating_sub(range);

        debug!("Fetching '{}' from Librato since {}", metric, start_time);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.email, Some(&self.credentials.token))
            .query(&[
                ("start_time", start_time.to_string()),
                ("resolution", RESOLUTION_SECS.to_string()),
            ])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SourceError::MetricNotFound(metric.to_string())),
            status if status.is_success() => {
                let body = response.text().await?;
                Self::parse_measurements(&body)
            }
            status => Err(SourceError::RequestFailed(format!(
                "Librato responded with status {}",
                status
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "librato"
    }
}
