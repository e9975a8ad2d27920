use crate::{
    error::{json_response, ApiError},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use umpire_core::{CheckOutcome, CheckParams};
use umpire_metrics::{exporters::PrometheusExporter, SummaryAggregator};

/// `GET /check`: evaluate one threshold check and map the outcome to a status.
pub async fn check(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let params: CheckParams = match pairs {
        Ok(Query(pairs)) => pairs.into_iter().collect(),
        Err(rejection) => {
            debug!("Unreadable check query: {}", rejection);
            return render_outcome(&CheckOutcome::Invalid);
        }
    };

    let request = params.into_request();
    let outcome = state.evaluator.evaluate(&request).await;
    render_outcome(&outcome)
}

pub fn render_outcome(outcome: &CheckOutcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, outcome.body())
}

/// `GET /health`
pub async fn health() -> Response {
    json_response(StatusCode::OK, json!({ "health": "ok" }))
}

/// `GET /metrics`: Prometheus text summary of recent checks.
pub async fn metrics(State(state): State<AppState>) -> Response {
    let records = state.collector.get_records().await;
    let summary = SummaryAggregator::summarize(&records);
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        PrometheusExporter::format(&summary),
    )
        .into_response()
}

pub async fn not_found() -> Response {
    ApiError::NotFound.into_response()
}
