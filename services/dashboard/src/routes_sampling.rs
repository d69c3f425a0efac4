use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use inspection::{draw_sample, DataVariant, EngineError, DEFAULT_SEED};

use crate::error::{engine_error, ApiError};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SamplingQuery {
    pub data_type: String,
    pub sample_size: usize,
    #[serde(default = "default_round")]
    pub round_num: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_round() -> u32 {
    1
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

pub async fn create_sample(
    State(state): State<SharedState>,
    Query(q): Query<SamplingQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let variant: DataVariant = q.data_type.parse().map_err(engine_error)?;

    let (session, sample) = tokio::task::spawn_blocking(move || {
        let table = state.datasets.load(variant)?;
        let (session, sample) = draw_sample(&table, variant, q.sample_size, q.round_num, q.seed);
        // Only the session is durable; records are re-derived on every read.
        state.store.save_session(&session)?;
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
