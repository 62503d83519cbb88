mod history;
mod visitors;

pub use crate::history::{ChargeSession, DEFAULT_HISTORY_LIMIT, HistoryError, SessionHistory};
pub use crate::visitors::{DEFAULT_VISITOR_SEED, VisitorCounter};

use charge_core::{
    CalculationResult, ChargeMode, ChargeSessionConfig, Co2Equivalents, CostComparison, Estimator,
    VehicleCatalog, VehicleSpec,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("{field} must be between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: u8 },
    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub vehicle_id: String,
    #[serde(flatten)]
    pub session: ChargeSessionConfig,
}

impl EstimateRequest {
    /// Reject inputs the estimator is not defined for.
    pub fn validate(&self) -> Result<(), RequestError> {
        let session = &self.session;
        for (field, value) in [
            ("currentPercent", session.current_percent),
            ("targetPercent", session.target_percent),
        ] {
            if value > 100 {
                return Err(RequestError::PercentOutOfRange { field, value });
            }
        }

        let (field, value) = match session.charge_mode {
            ChargeMode::Ac { amperage, .. } => ("amperage", amperage),
            ChargeMode::Dc { station_power_kw } => ("stationPowerKW", station_power_kw),
        };
        ensure_positive(field, value)?;
        ensure_positive("electricityPricePerKWh", session.electricity_price_per_kwh)
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), RequestError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RequestError::NotPositive { field, value })
    }
}

/// An estimate together with the vehicle it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimate {
    pub vehicle: VehicleSpec,
    pub result: CalculationResult,
    pub cost_comparison: CostComparison,
    pub co2_equivalents: Co2Equivalents,
}

/// Read-only calculator shared by every caller.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    catalog: VehicleCatalog,
    estimator: Estimator,
}

impl Engine {
    pub fn new(catalog: VehicleCatalog, estimator: Estimator) -> Self {
        Engine { catalog, estimator }
    }

    pub fn catalog(&self) -> &VehicleCatalog {
        &self.catalog
    }

    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Resolve a vehicle id, unknown ids give the default vehicle.
    pub fn lookup(&self, vehicle_id: &str) -> &VehicleSpec {
        let vehicle = self.catalog.lookup(vehicle_id);
        if vehicle.id != vehicle_id {
            tracing::warn!(
                "Unknown vehicle {}, falling back to {}",
                vehicle_id,
                vehicle.id
            );
        }
        vehicle
    }

    pub fn estimate(&self, request: &EstimateRequest) -> Result<Estimate, RequestError> {
        request.validate()?;

        let vehicle = self.lookup(&request.vehicle_id);
        let result = self.estimator.estimate(vehicle, &request.session);
        tracing::debug!(
            "Estimated {} {} {}% -> {}%: {:.2} kWh in {} min",
            vehicle.id,
            request.session.charge_mode.charge_type(),
            request.session.current_percent,
            request.session.target_percent,
            result.energy_needed_kwh,
            result.duration_minutes
        );

        let constants = self.estimator.constants();
        Ok(Estimate {
            vehicle: vehicle.clone(),
            cost_comparison: CostComparison::new(
                result.energy_needed_kwh,
                request.session.electricity_price_per_kwh,
                constants,
            ),
            co2_equivalents: Co2Equivalents::from_co2(result.co2_saved_kg, constants),
            result,
        })
    }
}
