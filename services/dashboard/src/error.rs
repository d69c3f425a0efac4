use axum::http::StatusCode;
use axum::Json;
use inspection::EngineError;
use serde_json::json;

pub type ApiError = (StatusCode, Json<serde_json::Value>);

/// NotFound -> 404, InvalidVariant -> 400, anything else -> 500 carrying the
/// underlying message.
pub fn engine_error(e: EngineError) -> ApiError {
    let status = match &e {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::InvalidVariant(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": e.to_string() })))
}
