use crate::collector::CheckRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total_checks: usize,
    pub outcomes: BTreeMap<String, usize>,
    pub latency_p50: Duration,
    pub latency_p95: Duration,
    pub latency_p99: Duration,
    pub average_latency: Duration,
    pub total_latency: Duration,
    pub min_latency: Duration,
    pub max_latency: Duration,
}

impl CheckSummary {
    pub fn count(&self, outcome: &str) -> usize {
        self.outcomes.get(outcome).copied().unwrap_or(0)
    }
}

pub struct SummaryAggregator;

impl SummaryAggregator {
    pub fn summarize(records: &[CheckRecord]) -> CheckSummary {
        let mut outcomes: BTreeMap<String, usize> = BTreeMap::new();
        let mut latencies: Vec<Duration> = Vec::with_capacity(records.len());

        for record in records {
            *outcomes.entry(record.outcome.clone()).or_insert(0) += 1;
            latencies.push(record.latency);
        }

        // Sort latencies for percentile calculation
        latencies.sort();

        let (min, max) = match (latencies.first(), latencies.last()) {
            (Some(min), Some(max)) => (*min, *max),
            _ => (Duration::ZERO, Duration::ZERO),
        };

        CheckSummary {
            total_checks: records.len(),
            outcomes,
            latency_p50: Self::percentile(&latencies, 0.50),
            latency_p95: Self::percentile(&latencies, 0.95),
            latency_p99: Self::percentile(&latencies, 0.99),
            average_latency: Self::average(&latencies),
            total_latency: latencies.iter().sum(),
            min_latency: min,
            max_latency: max,
        }
    }

    fn percentile(sorted: &[Duration], percentile: f64) -> Duration {
        if sorted.is_empty() {
            return Duration::ZERO;
        }

        let index = ((sorted.len() as f64) * percentile) as usize;
        let index = index.min(sorted.len() - 1);
        sorted[index]
    }

    fn average(durations: &[Duration]) -> Duration {
        if durations.is_empty() {
            return Duration::ZERO;
        }

        let sum: Duration = durations.iter().sum();
        sum / durations.len() as u32
    }
}
