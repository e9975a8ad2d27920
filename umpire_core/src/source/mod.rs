pub mod graphite;
pub mod librato;

use crate::{backend::Backend, error::Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use umpire_metrics::Sample;

pub use graphite::*;
pub use librato::*;

/// Core trait for all metrics backends
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Fetch the samples recorded for `metric` over the last `range_secs` seconds.
    ///
    /// An existing metric with nothing in the window is `Ok(vec![])`, not an error.
    async fn fetch(&self, metric: &str, range_secs: u64) -> Result<Vec<Sample>>;

    /// Get the name of this backend
    fn name(&self) -> &'static str;
}

pub type DynSource = Arc<dyn MetricSource>;

#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: HashMap<Backend, DynSource>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, backend: Backend, source: DynSource) {
        self.sources.insert(backend, source);
    }

    pub fn with_source(mut self, backend: Backend, source: DynSource) -> Self {
        self.register(backend, source);
        self
    }

    pub fn get(&self, backend: Backend) -> Option<&DynSource> {
        self.sources.get(&backend)
    }

    pub fn list(&self) -> Vec<Backend> {
        let mut backends: Vec<Backend> = self.sources.keys().copied().collect();
        backends.sort_by_key(|b| b.name());
        backends
    }
}
