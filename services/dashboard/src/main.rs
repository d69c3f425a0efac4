mod config;
mod error;
mod routes_ai;
mod routes_data;
mod routes_inspection;
mod routes_report;
mod routes_sampling;
mod state;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env()?;
    info!(data_dir = %cfg.data_dir.display(), results_dir = %cfg.results_dir.display(), "starting dashboard");

    let app_state = Arc::new(AppState::new(cfg.clone())?);

    let app = Router::new()
        .route("/", get(routes_data::get_root))
        .route("/api/data/summary", get(routes_data::get_summary))
        .route("/api/data/metrics/:data_type", get(routes_data::get_metrics))
        .route("/api/sampling/create", get(routes_sampling::create_sample))
        .route("/api/inspection/sessions", get(routes_inspection::get_sessions))
        .route("/api/inspection/session/:session_id", get(routes_inspection::get_session))
        .route("/api/inspection/save", post(routes_inspection::save_result))
        .route("/api/inspection/result/:session_id", get(routes_inspection::get_result))
        .route("/api/ai/batch-inspect", post(routes_ai::batch_inspect))
        .route("/api/report/summary", get(routes_report::get_report_summary))
        .layer(cors_layer(&cfg)?)
        .with_state(app_state);

    let addr = &cfg.bind_addr;
    println!("dashboard listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn cors_layer(cfg: &AppConfig) -> Result<CorsLayer> {
    if cfg.allowed_origins.iter().any(|o| o == "*") {
        return Ok(CorsLayer::permissive());
    }
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("invalid origin: {o}"))
        })
        .collect::<Result<_>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
