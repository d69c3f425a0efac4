use axum::extract::State;
use axum::Json;

use inspection::{build_report, ReportSummary};

use crate::error::{engine_error, ApiError};
use crate::state::SharedState;

pub async fn get_report_summary(
    State(state): State<SharedState>,
) -> Result<Json<ReportSummary>, ApiError> {
    let report = tokio::task::spawn_blocking(move || build_report(&state.datasets, &state.store))
        .await
        .expect("blocking task panicked")
        .map_err(engine_error)?;
    Ok(Json(report))
}
