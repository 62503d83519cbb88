use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use charge_engine::{EstimateRequest, RequestError};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn request_error_to_response(error: RequestError) -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// Estimate a charging session
pub async fn estimate(
    State(app_state): State<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> impl IntoResponse {
    match app_state.engine.estimate(&payload) {
        Ok(estimate) => (StatusCode::OK, Json(estimate)).into_response(),
        Err(error) => {
            tracing::info!("Rejected estimate request: {}", error);
            request_error_to_response(error).into_response()
        }
    }
}
