use crate::ui;
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use umpire_config::{parse_config_from_file, ServiceConfig};
use umpire_core::{Aggregator, Backend, CheckEvaluator, CheckOutcome, CheckRequest, TracingObserver};

pub struct CheckArgs {
    pub metric: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub range: u64,
    pub backend: String,
    pub aggregate: Option<String>,
    pub empty_ok: bool,
}

impl CheckArgs {
    pub fn to_request(&self) -> CheckRequest {
        let mut request = CheckRequest::new(self.metric.clone(), self.range)
            .empty_ok(self.empty_ok)
            .backend(Backend::from_selector(Some(self.backend.as_str())))
            .aggregator(Aggregator::from_selector(self.aggregate.as_deref()));
        request.min = self.min;
        request.max = self.max;
        request
    }
}

/// Returns whether the check passed (HTTP 200 equivalent).
pub async fn execute(args: CheckArgs, config_file: Option<PathBuf>) -> Result<bool> {
    let mut config = match &config_file {
        Some(path) => parse_config_from_file(path).await?,
        None => ServiceConfig::default(),
    };
    config.apply_env()?;

    let evaluator = CheckEvaluator::new(
        config.build_registry()?,
        Arc::new(TracingObserver::new("cli")),
    );

    let request = args.to_request();
    let outcome = evaluator.evaluate(&request).await;

    ui::print_header(&format!(
        "{} ({} over {}s via {})",
        args.metric,
        request.aggregator,
        args.range,
        request.backend
    ));
    print_outcome(&outcome);
    println!("{}", outcome.body());

    Ok(outcome.status_code() == 200)
}

fn print_outcome(outcome: &CheckOutcome) {
    let status = outcome.status_code();
    match outcome {
        CheckOutcome::Passed { value: Some(value) } => {
            ui::print_success(&format!("passed with value {} ({})", value, status))
        }
        CheckOutcome::Passed { value: None } => {
            ui::print_warning(&format!("passed with no values in range ({})", status))
        }
        CheckOutcome::Failed { value } => {
            ui::print_error(&format!("failed with value {} ({})", value, status))
        }
        other => ui::print_error(&format!("{} ({})", other.label().replace('_', " "), status)),
    }
    if let Some(value) = outcome.value() {
        println!("  Value: {}", value.to_string().bold());
    }
}
