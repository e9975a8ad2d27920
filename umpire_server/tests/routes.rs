//! Health, fallback, auth, HTTPS enforcement and `/metrics`.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{app, app_with, basic_auth, body_json, body_text, get, get_anonymous, StaticSource};
use serde_json::json;
use tower::ServiceExt;
use umpire_core::{Backend, SourceRegistry};

#[tokio::test]
async fn health_is_open() {
    let response = get_anonymous(app(&[]), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(body_json(response).await, json!({ "health": "ok" }));
}

#[tokio::test]
async fn unknown_route_returns_json_404() {
    let response = get(app(&[]), "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "error": "not found" }));
}

#[tokio::test]
async fn non_get_methods_return_404() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&[]).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_requires_credentials() {
    let response = get_anonymous(app(&[1.0]), "/check?metric=cpu.load&max=5&range=60").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        r#"Basic realm="Restricted Area""#
    );
    assert_eq!(body_json(response).await, json!({ "error": "not authorized" }));
}

#[tokio::test]
async fn wrong_api_key_is_rejected_before_fetching() {
    let source = StaticSource::values(&[1.0]);
    let registry = SourceRegistry::new().with_source(Backend::Graphite, source.clone());
    let (router, _) = app_with(registry, false);

    let request = Request::builder()
        .uri("/check?metric=cpu.load&max=5&range=60")
        .header(header::AUTHORIZATION, basic_auth("nope"))
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn force_https_redirects_plain_requests() {
    let registry = SourceRegistry::new().with_source(Backend::Graphite, StaticSource::values(&[]));
    let (router, _) = app_with(registry, true);

    let request = Request::builder()
        .uri("/check?metric=cpu.load&max=5&range=60")
        .header(header::HOST, "umpire.example.com")
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "https://umpire.example.com/check?metric=cpu.load&max=5&range=60"
    );

    let request = Request::builder()
        .uri("/health")
        .header(header::HOST, "umpire.example.com")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn metrics_summarises_checks() {
    let registry = SourceRegistry::new().with_source(Backend::Graphite, StaticSource::values(&[5.0]));
    let (router, collector) = app_with(registry, false);

    get(router.clone(), "/check?metric=cpu.load&max=10&range=60").await;
    get(router.clone(), "/check?metric=cpu.load&max=1&range=60").await;
    get(router.clone(), "/check?metric=cpu.load").await;
    assert_eq!(collector.len().await, 3);

    let response = get(router.clone(), "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);

    let text = body_text(response).await;
    assert!(text.contains("umpire_checks_total 3"));
    assert!(text.contains("umpire_check_outcomes_total{outcome=\"passed\"} 1"));
    assert!(text.contains("umpire_check_outcomes_total{outcome=\"failed\"} 1"));
    assert!(text.contains("umpire_check_outcomes_total{outcome=\"invalid\"} 1"));

    let response = get_anonymous(router, "/metrics").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
