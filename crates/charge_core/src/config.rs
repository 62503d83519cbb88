use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::builtin_vehicles;
use crate::{
    CatalogError, ChargeConstants, ChargeMode, ChargeSessionConfig, ChargeType, DcChargingCurve,
    Estimator, PhaseCount, VehicleCatalog, VehicleSpec,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Constant {name} has an invalid value: {value}")]
    InvalidConstant { name: &'static str, value: f64 },
    #[error("Session defaults are invalid: {reason}")]
    InvalidSessionDefaults { reason: String },
}

/// Calculator configuration, loaded once at startup.
///
/// Every field falls back to the built-in tables, so an empty JSON object
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    pub vehicles: Vec<VehicleSpec>,
    /// Vehicle returned for unknown ids, the first vehicle when unset.
    pub default_vehicle_id: Option<String>,
    pub dc_charging_curve: DcChargingCurve,
    pub constants: ChargeConstants,
    pub session_defaults: SessionDefaults,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        CalculatorConfig {
            vehicles: builtin_vehicles(),
            default_vehicle_id: None,
            dc_charging_curve: DcChargingCurve::default(),
            constants: ChargeConstants::default(),
            session_defaults: SessionDefaults::default(),
        }
    }
}

impl CalculatorConfig {
    /// Validate the configuration and build the runtime tables.
    pub fn build(&self) -> Result<(VehicleCatalog, Estimator), ConfigError> {
        if let Some((name, value)) = self.constants.first_invalid() {
            return Err(ConfigError::InvalidConstant { name, value });
        }
        self.session_defaults.validate()?;

        let catalog = VehicleCatalog::with_default(
            self.vehicles.clone(),
            self.default_vehicle_id.as_deref(),
        )?;
        let estimator = Estimator::new(self.dc_charging_curve.clone(), self.constants.clone());
        Ok((catalog, estimator))
    }
}

/// Values a new calculation starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionDefaults {
    pub vehicle_id: String,
    pub charge_type: ChargeType,
    pub current_percent: u8,
    pub target_percent: u8,
    pub amperage: f64,
    pub phase_count: PhaseCount,
    #[serde(rename = "stationPowerKW")]
    pub station_power_kw: f64,
}

impl Default for SessionDefaults {
    fn default() -> Self {
        SessionDefaults {
            vehicle_id: "ix-xdrive50".to_string(),
            charge_type: ChargeType::Ac,
            current_percent: 20,
            target_percent: 80,
            amperage: 16.0,
            phase_count: PhaseCount::Single,
            station_power_kw: 150.0,
        }
    }
}

impl SessionDefaults {
    fn validate(&self) -> Result<(), ConfigError> {
        let reason = if self.current_percent > 100 || self.target_percent > 100 {
            "percentages must be between 0 and 100"
        } else if !(self.amperage.is_finite() && self.amperage > 0.0) {
            "amperage must be positive"
        } else if !(self.station_power_kw.is_finite() && self.station_power_kw > 0.0) {
            "station power must be positive"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidSessionDefaults {
            reason: reason.to_string(),
        })
    }

    /// Session configuration for the given charge type using the defaults.
    pub fn session_config(
        &self,
        charge_type: ChargeType,
        electricity_price_per_kwh: f64,
        start_time: DateTime<Utc>,
    ) -> ChargeSessionConfig {
        let charge_mode = match charge_type {
            ChargeType::Ac => ChargeMode::Ac {
                amperage: self.amperage,
                phase_count: self.phase_count,
            },
            ChargeType::Dc => ChargeMode::Dc {
                station_power_kw: self.station_power_kw,
            },
        };
        ChargeSessionConfig {
            charge_mode,
            current_percent: self.current_percent,
            target_percent: self.target_percent,
            electricity_price_per_kwh,
            start_time,
        }
    }
}
