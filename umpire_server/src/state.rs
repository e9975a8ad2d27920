use std::sync::Arc;
use umpire_config::{ConfigError, ServiceConfig};
use umpire_core::{CheckEvaluator, CompositeObserver, TracingObserver};
use umpire_metrics::CheckCollector;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Everything inside is read-only or behind an `Arc`, so cloning per request
/// is cheap.
#[derive(Clone)]
pub struct AppState {
    pub evaluator: CheckEvaluator,
    pub collector: CheckCollector,
    pub api_key: Arc<str>,
    pub force_https: bool,
}

impl AppState {
    pub fn new(
        evaluator: CheckEvaluator,
        collector: CheckCollector,
        api_key: impl Into<Arc<str>>,
        force_https: bool,
    ) -> Self {
        Self {
            evaluator,
            collector,
            api_key: api_key.into(),
            force_https,
        }
    }

    /// Wires backends, the tracing observer and the collector from config.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let registry = config.build_registry()?;
        let collector = CheckCollector::new();
        let observer = CompositeObserver::new()
            .with(Arc::new(TracingObserver::default()))
            .with(Arc::new(collector.clone()));

        Ok(Self::new(
            CheckEvaluator::new(registry, Arc::new(observer)),
            collector,
            config.auth.api_key.as_str(),
            config.server.force_https,
        ))
    }
}
