//! HFpEF + CKD Readmission Risk Dashboard
//!
//! Serves the assessment form, scores one patient per submission and shows
//! the probability, its risk tier and the per-feature attribution.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    RISK DASHBOARD                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  HTML     │  │  JSON     │  │  Resource guard         │ │
//! │  │  pages    │  │  API      │  │  (middleware)           │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │            ┌─────────────────────┐                          │
//! │            │  hfpef-risk-core    │                          │
//! │            │  (ResourceCache)    │                          │
//! │            └─────────────────────┘                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod models;
mod handlers;
mod middleware;
mod error;
mod views;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use hfpef_risk_core::{EvaluationError, ResourceCache, Resources};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "hfpef_risk_dashboard=debug,hfpef_risk_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("Risk dashboard starting ({})...", config.environment);
    tracing::info!("Artifacts: {}", config.artifact_dir.display());

    let cache = Arc::new(ResourceCache::new(config.artifact_paths()));

    // Build application state
    let state = AppState {
        cache,
        config: config.clone(),
    };

    if config.preload_artifacts {
        state.load_artifacts().await;
        if !state.cache.is_available() {
            tracing::warn!("Serving without model artifacts; evaluation is disabled until restart");
        }
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ResourceCache>,
    pub config: config::Config,
}

impl AppState {
    /// Run the one-time artifact load on the blocking pool
    pub async fn load_artifacts(&self) {
        if self.cache.is_initialized() {
            return;
        }
        let cache = self.cache.clone();
        if let Err(e) = tokio::task::spawn_blocking(move || cache.is_available()).await {
            tracing::error!("Artifact load task failed: {}", e);
        }
    }

    /// Loaded resources, loading them off the async workers on first use
    pub async fn cache_ready(&self) -> Result<&Resources, EvaluationError> {
        self.load_artifacts().await;
        self.cache.require()
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Pages and metadata, always served
    let public_routes = Router::new()
        .route("/", get(handlers::dashboard::index))
        .route("/evaluate", post(handlers::dashboard::submit))
        .route("/health", get(handlers::health::check))
        .route("/api/v1/features", get(handlers::features::list))
        .route("/api/v1/model", get(handlers::model::status));

    // Evaluation API, blocked while the artifacts are unavailable
    let evaluation_routes = Router::new()
        .route("/api/v1/evaluate", post(handlers::evaluate::evaluate_patient))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::resources::require_resources
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(evaluation_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
