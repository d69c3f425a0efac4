use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use inspection::{compute_metrics, evaluate_criteria, DataVariant, DatasetSummary, MetricsReport};

use crate::error::{engine_error, ApiError};
use crate::state::SharedState;

pub async fn get_root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "dataset inspection API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn get_summary(
    State(state): State<SharedState>,
) -> Result<Json<DatasetSummary>, ApiError> {
    let summary = tokio::task::spawn_blocking(move || state.datasets.summary())
        .await
        .expect("blocking task panicked");
    Ok(Json(summary))
}

pub async fn get_metrics(
    State(state): State<SharedState>,
    Path(data_type): Path<String>,
) -> Result<Json<MetricsReport>, ApiError> {
    let variant: DataVariant = data_type.parse().map_err(engine_error)?;

    let report = tokio::task::spawn_blocking(move || {
        let table = state.datasets.load(variant)?;
        let metrics = compute_metrics(&table, variant);
        Ok::<_, inspection::EngineError>(evaluate_criteria(&metrics, variant))
    })
    .await
    .expect("blocking task panicked")
    .map_err(engine_error)?;

    Ok(Json(report))
}
