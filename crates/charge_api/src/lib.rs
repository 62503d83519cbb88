//! Charge Calculator API
//!
//! This library provides the HTTP API around the charge estimation engine.

mod app_state;
mod estimate;
mod session;
mod vehicles;

pub use crate::app_state::AppState;
pub use crate::estimate::ErrorResponse;
pub use crate::session::{SessionResponse, SessionsResponse};
pub use crate::vehicles::{DefaultsResponse, OptionsResponse, VEHICLE_FALLBACK_HEADER};

use axum::{
    Json, Router,
    extract::State,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorsResponse {
    pub count: u64,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Get the visitor count
pub async fn get_visitors(State(app_state): State<AppState>) -> Json<VisitorsResponse> {
    Json(VisitorsResponse {
        count: app_state.visitors.count(),
    })
}

/// Record a visit
pub async fn record_visit(State(app_state): State<AppState>) -> Json<VisitorsResponse> {
    Json(VisitorsResponse {
        count: app_state.visitors.visit(),
    })
}

/// Create the application router with all endpoints
pub fn create_app(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/vehicles", get(vehicles::list_vehicles))
        .route("/vehicles/{vehicle_id}", get(vehicles::get_vehicle))
        .route("/defaults", get(vehicles::get_defaults))
        .route("/options", get(vehicles::get_options))
        .route("/estimate", post(estimate::estimate))
        .route(
            "/sessions",
            get(session::list_sessions)
                .post(session::save_session)
                .delete(session::clear_sessions),
        )
        .route("/sessions/{session_id}", delete(session::delete_session))
        .route("/visitors", get(get_visitors).post(record_visit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
