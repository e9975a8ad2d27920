use crate::{auth, error, handlers, https, state::AppState};
use axum::{middleware, routing::get, Router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};
use umpire_config::ServiceConfig;

/// Build the full application [`Router`] with all middleware layers.
///
/// `/check` and `/metrics` sit behind the API key. Only `GET` is routed;
/// other methods and unknown paths get the JSON 404. Layers, outermost first:
///
/// 1. Request/response tracing
/// 2. Panic recovery (500 with a generic body)
/// 3. HTTPS enforcement
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/check", get(handlers::check).fallback(handlers::not_found))
        .route("/metrics", get(handlers::metrics).fallback(handlers::not_found))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/health", get(handlers::health).fallback(handlers::not_found))
        .merge(protected)
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            https::enforce_https,
        ))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

pub async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config)?;
    let backends: Vec<&str> = state
        .evaluator
        .registry()
        .list()
        .iter()
        .map(|b| b.name())
        .collect();
    let app = build_router(state);

    let addr = config.bind_address();
    info!("Starting umpire on {}", addr);
    info!("Backends: {}", backends.join(", "));
    info!("Endpoints:");
    info!("  GET  /check    - Threshold check (auth)");
    info!("  GET  /metrics  - Check statistics (auth)");
    info!("  GET  /health   - Health check");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
