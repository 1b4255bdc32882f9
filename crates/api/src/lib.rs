//! AquaCare API Server
//!
//! REST API for tracking aquarium fish health: aquariums, fish, health logs
//! with symptom triage, treatments, alerts and analytics.

use alerting::AlertManager;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use data_validator::Validator;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use storage::Repository;
use tokio::sync::RwLock;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

pub mod config;
pub mod error;
pub mod extract;
pub mod rate_limit;
mod routes;
pub mod scheduler;
pub mod telemetry;
pub mod validation;
pub mod workflow;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};

/// Application state shared across handlers
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Builds health and reminder alerts
    pub alerts: AlertManager,
    /// Request field validator
    pub validator: Validator,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create application state around an existing repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            repository,
            alerts: AlertManager::new(config.alerts.clone()),
            validator: Validator::new(config.validation.clone()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
            metrics: None,
        }
    }
}

pub type SharedState = Arc<RwLock<AppState>>;

/// Health response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub version: String,
    pub uptime_seconds: u64,
    pub fish_count: usize,
    pub health_log_count: usize,
    pub alert_count: usize,
}

/// Create the application router
pub fn create_router(state: SharedState) -> Router {
    let api = Router::new()
        .route("/health", get(health_handler))
        .merge(routes::triage::router())
        .merge(routes::aquariums::router())
        .merge(routes::fish::router())
        .merge(routes::health_logs::router())
        .merge(routes::treatments::router())
        .merge(routes::alerts::router())
        .merge(routes::analytics::router());

    Router::new()
        .nest("/api/v1", api)
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    let state = state.read().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().timestamp(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        fish_count: state.repository.fish_count(),
        health_log_count: state.repository.health_log_count(),
        alert_count: state.repository.alert_count(),
    })
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed".to_string(),
        ),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Run the server until Ctrl-C
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let repository = match &config.snapshot_path {
        Some(path) => Repository::load_snapshot(path)?,
        None => Repository::new(),
    };

    let mut state = AppState::new(repository, &config);
    state.metrics = telemetry::init_metrics();
    let state = Arc::new(RwLock::new(state));

    let scheduler = scheduler::spawn_alert_scheduler(
        state.clone(),
        Duration::from_secs(config.alert_check_interval_secs),
    );

    let mut app = create_router(state.clone());
    if config.rate_limit.enabled {
        match rate_limit::create_governor_config(&config.rate_limit) {
            Some(governor) => {
                rate_limit::spawn_limiter_cleanup(governor.clone(), Duration::from_secs(60));
                app = app.layer(GovernorLayer { config: governor });
            }
            None => warn!("Invalid rate limit settings; serving without a limiter"),
        }
    }

    info!("Starting API server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    scheduler.abort();
    if let Some(path) = &config.snapshot_path {
        state.read().await.repository.save_snapshot(path)?;
        info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
