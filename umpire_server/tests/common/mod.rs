#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use umpire_core::{
    async_trait, Backend, CheckEvaluator, MetricSource, Sample, SourceError, SourceRegistry,
};
use umpire_metrics::CheckCollector;
use umpire_server::{build_router, AppState};

pub const API_KEY: &str = "test-key";

/// Backend stub that answers every fetch with the same result.
pub struct StaticSource {
    result: Result<Vec<f64>, SourceError>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn values(values: &[f64]) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(values.to_vec()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing(err: SourceError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricSource for StaticSource {
    async fn fetch(&self, _metric: &str, _range_secs: u64) -> umpire_core::Result<Vec<Sample>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map(|values| values.into_iter().map(Sample::new).collect())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

pub struct PanickingSource;

#[async_trait]
impl MetricSource for PanickingSource {
    async fn fetch(&self, _metric: &str, _range_secs: u64) -> umpire_core::Result<Vec<Sample>> {
        panic!("backend client bug at http://graphite.internal:8080");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

pub fn app_with(registry: SourceRegistry, force_https: bool) -> (Router, CheckCollector) {
    let collector = CheckCollector::new();
    let evaluator = CheckEvaluator::new(registry, Arc::new(collector.clone()));
    let state = AppState::new(evaluator, collector.clone(), API_KEY, force_https);
    (build_router(state), collector)
}

/// Router whose Graphite backend always returns `values`.
pub fn app(values: &[f64]) -> Router {
    let registry = SourceRegistry::new().with_source(Backend::Graphite, StaticSource::values(values));
    app_with(registry, false).0
}

pub fn app_with_source(source: Arc<dyn MetricSource>) -> Router {
    let registry = SourceRegistry::new().with_source(Backend::Graphite, source);
    app_with(registry, false).0
}

pub fn basic_auth(password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("ops:{}", password)))
}

/// Authenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(API_KEY))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let text = body_text(response).await;
    assert!(text.ends_with('\n'), "body must end with a newline: {text:?}");
    serde_json::from_str(&text).unwrap()
}
