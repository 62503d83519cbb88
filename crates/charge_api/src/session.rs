use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use charge_engine::{ChargeSession, EstimateRequest, HistoryError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::estimate::{ErrorResponse, request_error_to_response};

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session: ChargeSession,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsResponse {
    pub sessions: Vec<ChargeSession>,
}

fn history_error_to_response(error: HistoryError) -> impl IntoResponse {
    let status = match error {
        HistoryError::NothingToSave => StatusCode::CONFLICT,
        HistoryError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

/// List saved sessions, newest first
pub async fn list_sessions(State(app_state): State<AppState>) -> Json<SessionsResponse> {
    let sessions = app_state.history().list().to_vec();
    Json(SessionsResponse { sessions })
}

/// Estimate a charging session and save it to the history
pub async fn save_session(
    State(app_state): State<AppState>,
    Json(payload): Json<EstimateRequest>,
) -> impl IntoResponse {
    let estimate = match app_state.engine.estimate(&payload) {
        Ok(estimate) => estimate,
        Err(error) => return request_error_to_response(error).into_response(),
    };

    let session = ChargeSession::from_estimate(&estimate, &payload, Utc::now());
    match app_state.history().save(session) {
        Ok(session) => (StatusCode::OK, Json(SessionResponse { session })).into_response(),
        Err(error) => history_error_to_response(error).into_response(),
    }
}

/// Delete one saved session
pub async fn delete_session(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    match app_state.history().delete(session_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => history_error_to_response(error).into_response(),
    }
}

/// Delete every saved session
pub async fn clear_sessions(State(app_state): State<AppState>) -> impl IntoResponse {
    app_state.history().clear();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::delete, routing::get};
    use axum::{body::Body, http::Request};
    use tower::util::ServiceExt;

    /// Create the application router with session endpoints
    fn create_app(app_state: AppState) -> Router {
        Router::new()
            .route(
                "/sessions",
                get(list_sessions).post(save_session).delete(clear_sessions),
            )
            .route("/sessions/{session_id}", delete(delete_session))
            .with_state(app_state)
    }

    fn save_request(current: u8, target: u8) -> Request<Body> {
        let body = serde_json::json!({
            "vehicleId": "i5-edrive40",
            "chargeMode": "AC",
            "amperage": 16,
            "phaseCount": 3,
            "currentPercent": current,
            "targetPercent": target,
            "electricityPricePerKWh": 2.5,
            "startTime": "2024-05-01T08:00:00Z"
        });
        Request::builder()
            .uri("/sessions")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_save_and_list_sessions() {
        let app_state = AppState::default();
        let app = create_app(app_state.clone());

        let response = app.clone().oneshot(save_request(20, 80)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved: SessionResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(saved.session.vehicle_name, "BMW i5 eDrive40");
        assert_eq!(saved.session.end_percent, 80);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed: SessionsResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(listed.sessions.len(), 1);
        assert_eq!(listed.sessions[0].id, saved.session.id);

        // The handlers share the injected history
        assert_eq!(app_state.history().len(), 1);
    }

    #[tokio::test]
    async fn test_save_zero_session_conflicts() {
        let app = create_app(AppState::default());

        let response = app.oneshot(save_request(80, 50)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ErrorResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert!(error.error.contains("no charge to save"));
    }

    #[tokio::test]
    async fn test_save_invalid_request() {
        let app = create_app(AppState::default());

        let response = app.oneshot(save_request(20, 101)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_delete_and_clear_sessions() {
        let app_state = AppState::default();
        let app = create_app(app_state.clone());

        let response = app.clone().oneshot(save_request(20, 80)).await.unwrap();
        let saved: SessionResponse = serde_json::from_slice(&body_bytes(response).await).unwrap();
        app.clone().oneshot(save_request(10, 90)).await.unwrap();

        let delete_request = || {
            Request::builder()
                .uri(format!("/sessions/{}", saved.session.id))
                .method("DELETE")
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(delete_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(app_state.history().len(), 1);

        let response = app.clone().oneshot(delete_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/sessions")
                    .method("DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(app_state.history().is_empty());
    }
}
