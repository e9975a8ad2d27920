use crate::summary::CheckSummary;
use std::fmt::Write;

pub struct PrometheusExporter;

impl PrometheusExporter {
    pub fn format(summary: &CheckSummary) -> String {
        let mut out = format!(
            r#"# HELP umpire_checks_total Total number of check evaluations
# TYPE umpire_checks_total counter
umpire_checks_total {}

# HELP umpire_check_outcomes_total Check evaluations by outcome
# TYPE umpire_check_outcomes_total counter
"#,
            summary.total_checks,
        );

        for (outcome, count) in &summary.outcomes {
            let _ = writeln!(
                out,
                "umpire_check_outcomes_total{{outcome=\"{}\"}} {}",
                outcome, count
            );
        }

        let _ = write!(
            out,
            r#"
# HELP umpire_check_latency_seconds Check evaluation latency in seconds
# TYPE umpire_check_latency_seconds summary
umpire_check_latency_seconds{{quantile="0.5"}} {}
umpire_check_latency_seconds{{quantile="0.95"}} {}
umpire_check_latency_seconds{{quantile="0.99"}} {}
umpire_check_latency_seconds_sum {}
umpire_check_latency_seconds_count {}

# HELP umpire_check_latency_avg_seconds Average check evaluation latency in seconds
# TYPE umpire_check_latency_avg_seconds gauge
umpire_check_latency_avg_seconds {}
"#,
            summary.latency_p50.as_secs_f64(),
            summary.latency_p95.as_secs_f64(),
            summary.latency_p99.as_secs_f64(),
            summary.total_latency.as_secs_f64(),
            summary.total_checks,
            summary.average_latency.as_secs_f64(),
        );

        out
    }
}
