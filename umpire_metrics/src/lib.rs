pub mod aggregator;
pub mod collector;
pub mod exporters;
pub mod summary;

pub use aggregator::{Aggregator, Sample};
pub use collector::{CheckCollector, CheckRecord};
pub use summary::{CheckSummary, SummaryAggregator};
