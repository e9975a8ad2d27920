use crate::{backend::Backend, outcome::CheckOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use umpire_metrics::{Aggregator, CheckCollector};

/// What the evaluator reports once a check has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckEvent {
    pub metric: Option<String>,
    pub backend: Backend,
    pub aggregator: Aggregator,
    pub outcome: CheckOutcome,
    pub elapsed: Duration,
}

/// Receives every finished evaluation. Injected into the evaluator at
/// construction.
#[async_trait]
pub trait CheckObserver: Send + Sync {
    async fn on_check(&self, event: &CheckEvent);
}

pub struct NoopObserver;

#[async_trait]
impl CheckObserver for NoopObserver {
    async fn on_check(&self, _event: &CheckEvent) {}
}

/// Logs each evaluation as one structured event.
pub struct TracingObserver {
    namespace: &'static str,
}

impl TracingObserver {
    pub fn new(namespace: &'static str) -> Self {
        Self { namespace }
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("web")
    }
}

#[async_trait]
impl CheckObserver for TracingObserver {
    async fn on_check(&self, event: &CheckEvent) {
        info!(
            ns = self.namespace,
            metric = event.metric.as_deref().unwrap_or(""),
            backend = %event.backend,
            aggregate = %event.aggregator,
            outcome = event.outcome.label(),
            value = ?event.outcome.value(),
            elapsed_ms = event.elapsed.as_millis() as u64,
            "check evaluated"
        );
    }
}

#[async_trait]
impl CheckObserver for CheckCollector {
    async fn on_check(&self, event: &CheckEvent) {
        self.record_check(
            event.metric.clone().unwrap_or_default(),
            event.outcome.label(),
            event.elapsed,
        )
        .await;
    }
}

#[derive(Default, Clone)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn CheckObserver>>,
}

impl CompositeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.observers.push(observer);
        self
    }
}

#[async_trait]
impl CheckObserver for CompositeObserver {
    async fn on_check(&self, event: &CheckEvent) {
        for observer in &self.observers {
            observer.on_check(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(outcome: CheckOutcome) -> CheckEvent {
        CheckEvent {
            metric: Some("cpu.load".to_string()),
            backend: Backend::Graphite,
            aggregator: Aggregator::Avg,
            outcome,
            elapsed: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn test_composite_fans_out() {
        let first = Arc::new(CheckCollector::new());
        let second = Arc::new(CheckCollector::new());
        let composite = CompositeObserver::new()
            .with(first.clone())
            .with(Arc::new(TracingObserver::default()))
            .with(second.clone());

        composite.on_check(&event(CheckOutcome::NotFound)).await;

        assert_eq!(first.len().await, 1);
        assert_eq!(second.get_records().await[0].outcome, "not_found");
    }

    #[tokio::test]
    async fn test_collector_records_invalid_without_metric() {
        let collector = CheckCollector::new();
        let mut invalid = event(CheckOutcome::Invalid);
        invalid.metric = None;

        collector.on_check(&invalid).await;

        let records = collector.get_records().await;
        assert_eq!(records[0].metric, "");
        assert_eq!(records[0].outcome, "invalid");
    }
}
