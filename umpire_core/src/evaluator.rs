use crate::{
    error::SourceError,
    observer::{CheckEvent, CheckObserver, NoopObserver},
    outcome::CheckOutcome,
    request::CheckRequest,
    source::SourceRegistry,
};
use std::sync::Arc;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Runs a check request through fetch, aggregate and threshold decision.
///
/// Holds only read-only configuration, so one evaluator is shared by all
/// concurrent requests.
#[derive(Clone)]
pub struct CheckEvaluator {
    registry: Arc<SourceRegistry>,
    observer: Arc<dyn CheckObserver>,
}

impl CheckEvaluator {
    pub fn new(registry: SourceRegistry, observer: Arc<dyn CheckObserver>) -> Self {
        Self {
            registry: Arc::new(registry),
            observer,
        }
    }

    pub fn without_observer(registry: SourceRegistry) -> Self {
        Self::new(registry, Arc::new(NoopObserver))
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub async fn evaluate(&self, request: &CheckRequest) -> CheckOutcome {
        let start = Instant::now();
        let outcome = self.decide(request).await;

        self.observer
            .on_check(&CheckEvent {
                metric: request.metric.clone(),
                backend: request.backend,
                aggregator: request.aggregator,
                outcome,
                elapsed: start.elapsed(),
            })
            .await;

        outcome
    }

    async fn decide(&self, request: &CheckRequest) -> CheckOutcome {
        let Some((metric, range, bounds)) = request.validate() else {
            debug!("Rejecting check with missing parameters");
            return CheckOutcome::Invalid;
        };

        let Some(source) = self.registry.get(request.backend) else {
            warn!("Backend '{}' is not configured", request.backend);
            return CheckOutcome::BackendUnavailable;
        };

        let samples = match source.fetch(metric, range).await {
            Ok(samples) => samples,
            Err(SourceError::MetricNotFound(_)) => return CheckOutcome::NotFound,
            Err(SourceError::RequestFailed(reason)) => {
                warn!(
                    "Fetching '{}' from {} failed: {}",
                    metric,
                    source.name(),
                    reason
                );
                return CheckOutcome::BackendUnavailable;
            }
        };

        let Some(value) = request.aggregator.aggregate(&samples) else {
            return if request.empty_ok {
                CheckOutcome::Passed { value: None }
            } else {
                CheckOutcome::NoData
            };
        };

        if bounds.contains(value) {
            CheckOutcome::Passed { value: Some(value) }
        } else {
            CheckOutcome::Failed { value }
        }
    }
}
