use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;

use inspection::{aggregate_items, auto_inspect, EngineError};

use crate::error::{engine_error, ApiError};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct BatchInspectRequest {
    pub session_id: String,
}

pub async fn batch_inspect(
    State(state): State<SharedState>,
    Json(req): Json<BatchInspectRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.cfg.auto_inspect_enabled {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "auto inspection is not configured" })),
        ));
    }

    let result = tokio::task::spawn_blocking(move || {
        let session = state.store.load_session(&req.session_id)?;
        let table = state.datasets.load(session.data_type)?;
        // Fresh generator per run, independent of the sampling seed.
        let mut rng = StdRng::from_entropy();
        let items = auto_inspect(&session, &table, &mut rng);
        let result = aggregate_items(&session, items);
        state.store.save_result(&result)?;
        Ok::<_, EngineError>(result)
    })
    .await
    .expect("blocking task panicked")
    .map_err(engine_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "automatic inspection completed",
        "result_summary": {
            "total_items": result.total_items,
            "pass_count": result.pass_count,
            "fail_count": result.fail_count,
            "pass_rate": result.pass_rate,
        },
    })))
}
