pub mod errors;

use anyhow::Result;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::defaults::API_PREFIX;
use crate::config::{LimitsConfig, ServerConfig};
use crate::firewall::{FirewallDecision, FirewallEngine};
use crate::scoring::{TrustScoreEngine, TrustScoreResult};
use crate::validation::RequestValidator;
use errors::ApiError;

/// Shared handler state. Engines are stateless, so one instance serves all
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub trust_engine: Arc<TrustScoreEngine>,
    pub firewall: Arc<FirewallEngine>,
    pub limits: LimitsConfig,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            trust_engine: Arc::new(TrustScoreEngine::new()),
            firewall: Arc::new(FirewallEngine::new(config.firewall.default_mode)),
            limits: config.limits.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub text: String,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub trust_analysis: TrustScoreResult,
    pub firewall_decision: FirewallDecision,
}

pub struct TrustFirewallServer {
    config: ServerConfig,
    state: AppState,
}

impl TrustFirewallServer {
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    pub async fn run(&self) -> Result<()> {
        let app = build_router(self.state.clone(), self.config.static_dir.as_deref());

        let listener =
            tokio::net::TcpListener::bind(format!("0.0.0.0:{}", self.config.port)).await?;
        info!(
            "✅ Trust Firewall server listening on http://0.0.0.0:{}",
            self.config.port
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Assemble the application router. Exposed separately so tests can drive
/// the service in-process.
pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/evaluate", post(evaluate_text))
        .route("/health", get(health_check))
        .with_state(state);

    let mut app = Router::new().nest(API_PREFIX, api);

    if let Some(dir) = static_dir {
        info!("Mounting frontend from: {}", dir.display());
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Full evaluation pipeline: trust score + firewall decision.
async fn evaluate_text(
    State(state): State<AppState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    info!("Received evaluation request. Mode: {:?}", req.mode);

    RequestValidator::check_evaluation(&req.text, &req.context, &state.limits)?;

    let mode = state.firewall.resolve_mode(req.mode.as_deref());
    let trust_engine = Arc::clone(&state.trust_engine);
    let firewall = Arc::clone(&state.firewall);

    // Scoring is CPU-bound; keep it off the async reactor. A panic in the
    // pipeline surfaces here as a join error and becomes a generic 500.
    let response = tokio::task::spawn_blocking(move || {
        let trust_analysis = trust_engine.aggregate(&req.text, &req.context);
        let firewall_decision = firewall.decide(&req.text, trust_analysis.trust_score, mode);
        EvaluateResponse {
            trust_analysis,
            firewall_decision,
        }
    })
    .await
    .map_err(|e| ApiError::internal(anyhow::anyhow!(e)))?;

    Ok(Json(response))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "Trust Firewall Operational",
        "server": "trust-firewall-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "default_mode": state.firewall.default_mode().as_str(),
    }))
}
