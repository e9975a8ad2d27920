use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// One finished check evaluation as seen by the collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub metric: String,
    pub outcome: String,
    pub latency: Duration,
    pub timestamp: DateTime<Utc>,
}

/// Keeps the most recent check records in memory for the `/metrics` summary.
#[derive(Clone)]
pub struct CheckCollector {
    records: Arc<RwLock<VecDeque<CheckRecord>>>,
    capacity: usize,
}

impl CheckCollector {
    pub const DEFAULT_CAPACITY: usize = 10_000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub async fn record(&self, record: CheckRecord) {
        let mut records = self.records.write().await;
        while records.len() >= self.capacity {
            records.pop_front();
        }
        records.push_back(record);
    }

    pub async fn record_check(
        &self,
        metric: impl Into<String>,
        outcome: impl Into<String>,
        latency: Duration,
    ) {
        self.record(CheckRecord {
            metric: metric.into(),
            outcome: outcome.into(),
            latency,
            timestamp: Utc::now(),
        })
        .await;
    }

    pub async fn get_records(&self) -> Vec<CheckRecord> {
        self.records.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl Default for CheckCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_read_back() {
        let collector = CheckCollector::new();
        collector
            .record_check("cpu.load", "passed", Duration::from_millis(12))
            .await;
        collector
            .record_check("cpu.load", "failed", Duration::from_millis(30))
            .await;

        let records = collector.get_records().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome, "passed");
        assert_eq!(records[1].latency, Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_capacity_drops_oldest() {
        let collector = CheckCollector::with_capacity(2);
        for outcome in ["passed", "failed", "no_data"] {
            collector
                .record_check("disk.used", outcome, Duration::from_millis(1))
                .await;
        }

        let outcomes: Vec<String> = collector
            .get_records()
            .await
            .into_iter()
            .map(|r| r.outcome)
            .collect();
        assert_eq!(outcomes, vec!["failed", "no_data"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let collector = CheckCollector::new();
        collector
            .record_check("cpu.load", "passed", Duration::ZERO)
            .await;
        collector.clear().await;
        assert_eq!(collector.len().await, 0);
    }
}
