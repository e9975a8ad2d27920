pub mod backend;
pub mod error;
pub mod evaluator;
pub mod observer;
pub mod outcome;
pub mod request;
pub mod source;
pub mod threshold;

pub use backend::Backend;
pub use error::{Result, SourceError};
pub use evaluator::CheckEvaluator;
pub use observer::{CheckEvent, CheckObserver, CompositeObserver, NoopObserver, TracingObserver};
pub use outcome::CheckOutcome;
pub use request::{CheckParams, CheckRequest};
pub use source::{DynSource, GraphiteSource, LibratoSource, MetricSource, SourceRegistry};
pub use threshold::Bounds;

// Re-export commonly used types
pub use async_trait::async_trait;
pub use umpire_metrics::{Aggregator, Sample};
