use crate::{error::*, source::MetricSource};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use umpire_metrics::Sample;

/// One series from the Graphite render API. Datapoints are `[value, timestamp]`
/// pairs and the value is `null` for empty buckets.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphiteSeries {
    pub target: String,
    #[serde(default)]
    pub datapoints: Vec<(Option<f64>, Option<i64>)>,
}

pub struct GraphiteSource {
    base_url: String,
    client: reqwest::Client,
}

impl GraphiteSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Parse a render API response body into the samples of its first series.
    pub fn parse_render(metric: &str, body: &str) -> Result<Vec<Sample>> {
        let series: Vec<GraphiteSeries> = serde_json::from_str(body).map_err(|e| {
            SourceError::RequestFailed(format!("invalid Graphite response: {}", e))
        })?;

        let Some(first) = series.into_iter().next() else {
            return Err(SourceError::MetricNotFound(metric.to_string()));
        };

        let samples = first
            .datapoints
            .into_iter()
            .filter_map(|(value, timestamp)| {
                let value = value?;
                Some(match timestamp.and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)) {
                    Some(at) => Sample::at(value, at),
                    None => Sample::new(value),
                })
            })
            .collect();

        Ok(samples)
    }
}

#[async_trait]
impl MetricSource for GraphiteSource {
    async fn fetch(&self, metric: &str, range_secs: u64) -> Result<Vec<Sample>> {
        let url = format!("{}/render/", self.base_url);
        let from = format!("-{}s", range_secs);

        debug!("Fetching '{}' from Graphite over {}s", metric, range_secs);

        let response = self
            .client
            .get(&url)
            .query(&[("target", metric), ("from", from.as_str()), ("format", "json")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::RequestFailed(format!(
                "Graphite responded with status {}",
                status
            )));
        }

        let body = response.text().await?;
        Self::parse_render(metric, &body)
    }

    fn name(&self) -> &'static str {
        "graphite"
    }
}
