use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use inspection::{aggregate_items, materialize, EngineError, InspectionItem, InspectionResult};

use crate::error::{engine_error, ApiError};
use crate::state::SharedState;

pub async fn get_sessions(
    State(state): State<SharedState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let sessions = tokio::task::spawn_blocking(move || state.store.list_sessions())
        .await
        .expect("blocking task panicked")
        .map_err(engine_error)?;
    Ok(Json(json!({ "sessions": sessions })))
}

pub async fn get_session(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let (session, sample) = tokio::task::spawn_blocking(move || {
        let session = state.store.load_session(&session_id)?;
        let table = state.datasets.load(session.data_type)?;
        let sample = materialize(&table, &session);
        Ok::<_, EngineError>((session, sample))
    })
    .await
    .expect("blocking task panicked")
    .map_err(engine_error)?;

    Ok(Json(json!({
        "session_id": session.session_id.clone(),
        "session_info": session,
        "sample_data": sample.records,
        "similar_items": sample.similar_items,
    })))
}

#[derive(Deserialize)]
pub struct SaveResultRequest {
    pub session_id: String,
    pub inspections: Vec<InspectionItem>,
}

pub async fn save_result(
    State(state): State<SharedState>,
    Json(req): Json<SaveResultRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let result = tokio::task::spawn_blocking(move || {
        let session = state.store.load_session(&req.session_id)?;
        let result = aggregate_items(&session, req.inspections);
        state.store.save_result(&result)?;
        Ok::<_, EngineError>(result)
    })
    .await
    .expect("blocking task panicked")
    .map_err(engine_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "inspection result saved",
        "result_summary": result,
    })))
}

pub async fn get_result(
    State(state): State<SharedState>,
    Path(session_id): Path<String>,
) -> Result<Json<InspectionResult>, ApiError> {
    let result = tokio::task::spawn_blocking(move || state.store.load_result(&session_id))
        .await
        .expect("blocking task panicked")
        .map_err(engine_error)?;
    Ok(Json(result))
}
