use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderName, HeaderValue},
    response::IntoResponse,
};
use charge_core::{AmperageOption, SessionDefaults, StationOption, VehicleSpec};
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;

/// Set on vehicle lookups answered with the default vehicle.
pub const VEHICLE_FALLBACK_HEADER: HeaderName = HeaderName::from_static("x-vehicle-fallback");

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultsResponse {
    pub vehicle: VehicleSpec,
    pub session_defaults: SessionDefaults,
    #[serde(rename = "electricityPricePerKWh")]
    pub electricity_price_per_kwh: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub amperages: Vec<AmperageOption>,
    pub dc_stations: Vec<StationOption>,
}

/// List every vehicle of the catalog
pub async fn list_vehicles(State(app_state): State<AppState>) -> Json<Vec<VehicleSpec>> {
    Json(app_state.engine.catalog().vehicles().to_vec())
}

/// Get a vehicle, unknown ids answer with the default vehicle
pub async fn get_vehicle(
    State(app_state): State<AppState>,
    Path(vehicle_id): Path<String>,
) -> impl IntoResponse {
    let vehicle = app_state.engine.lookup(&vehicle_id).clone();
    let fallback = vehicle.id != vehicle_id;
    (
        [(
            VEHICLE_FALLBACK_HEADER,
            HeaderValue::from_static(if fallback { "true" } else { "false" }),
        )],
        Json(vehicle),
    )
}

/// Get the values a new calculation starts from
pub async fn get_defaults(State(app_state): State<AppState>) -> Json<DefaultsResponse> {
    let session_defaults = app_state.session_defaults.as_ref().clone();
    Json(DefaultsResponse {
        vehicle: app_state
            .engine
            .lookup(&session_defaults.vehicle_id)
            .clone(),
        electricity_price_per_kwh: app_state
            .engine
            .estimator()
            .constants()
            .default_electricity_price,
        session_defaults,
    })
}

/// Get the selectable charger settings
pub async fn get_options(State(app_state): State<AppState>) -> Json<OptionsResponse> {
    let ac_voltage = app_state.engine.estimator().constants().ac_voltage;
    Json(OptionsResponse {
        amperages: charge_core::amperage_options(ac_voltage),
        dc_stations: charge_core::dc_station_options(),
    })
}
