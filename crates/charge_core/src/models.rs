use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSpec {
    pub id: String,
    pub name: String,
    #[serde(rename = "batteryCapacityKWh")]
    pub battery_capacity_kwh: f64,
    #[serde(rename = "maxACPowerKW")]
    pub max_ac_power_kw: f64,
    #[serde(rename = "maxDCPowerKW")]
    pub max_dc_power_kw: f64,
    /// Display only, the estimator never reads it.
    pub wltp_range_km: f64,
}

impl VehicleSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        battery_capacity_kwh: f64,
        max_ac_power_kw: f64,
        max_dc_power_kw: f64,
        wltp_range_km: f64,
    ) -> Self {
        VehicleSpec {
            id: id.into(),
            name: name.into(),
            battery_capacity_kwh,
            max_ac_power_kw,
            max_dc_power_kw,
            wltp_range_km,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Phase count must be 1 or 3, got {0}")]
pub struct PhaseCountError(pub u8);

/// Number of AC phases used by the charger, single phase unless stated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PhaseCount {
    #[default]
    Single,
    Three,
}

impl PhaseCount {
    pub fn count(self) -> u8 {
        match self {
            PhaseCount::Single => 1,
            PhaseCount::Three => 3,
        }
    }
}

impl TryFrom<u8> for PhaseCount {
    type Error = PhaseCountError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(PhaseCount::Single),
            3 => Ok(PhaseCount::Three),
            other => Err(PhaseCountError(other)),
        }
    }
}

impl From<PhaseCount> for u8 {
    fn from(phases: PhaseCount) -> Self {
        phases.count()
    }
}

/// Plain charge type, without the mode parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargeType {
    #[serde(rename = "AC")]
    Ac,
    #[serde(rename = "DC")]
    Dc,
}

impl std::fmt::Display for ChargeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargeType::Ac => write!(f, "AC"),
            ChargeType::Dc => write!(f, "DC"),
        }
    }
}

/// Charge mode together with the parameters that only make sense for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chargeMode", rename_all_fields = "camelCase")]
pub enum ChargeMode {
    #[serde(rename = "AC")]
    Ac {
        amperage: f64,
        #[serde(default)]
        phase_count: PhaseCount,
    },
    #[serde(rename = "DC")]
    Dc {
        #[serde(rename = "stationPowerKW")]
        station_power_kw: f64,
    },
}

impl ChargeMode {
    pub fn charge_type(&self) -> ChargeType {
        match self {
            ChargeMode::Ac { .. } => ChargeType::Ac,
            ChargeMode::Dc { .. } => ChargeType::Dc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeSessionConfig {
    #[serde(flatten)]
    pub charge_mode: ChargeMode,
    pub current_percent: u8,
    pub target_percent: u8,
    #[serde(rename = "electricityPricePerKWh")]
    pub electricity_price_per_kwh: f64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    #[serde(rename = "energyNeededKWh")]
    pub energy_needed_kwh: f64,
    #[serde(rename = "grossPowerKW")]
    pub gross_power_kw: f64,
    #[serde(rename = "netPowerKW")]
    pub net_power_kw: f64,
    #[serde(rename = "lossPowerKW")]
    pub loss_power_kw: f64,
    pub efficiency_ratio: f64,
    pub duration_minutes: u32,
    pub finish_time: DateTime<Utc>,
    pub cost_currency: f64,
    pub co2_saved_kg: f64,
}

impl CalculationResult {
    /// Result of a session where nothing gets charged.
    pub fn zero_session(efficiency_ratio: f64, start_time: DateTime<Utc>) -> Self {
        CalculationResult {
            energy_needed_kwh: 0.0,
            gross_power_kw: 0.0,
            net_power_kw: 0.0,
            loss_power_kw: 0.0,
            efficiency_ratio,
            duration_minutes: 0,
            finish_time: start_time,
            cost_currency: 0.0,
            co2_saved_kg: 0.0,
        }
    }

    pub fn is_zero_session(&self) -> bool {
        self.duration_minutes == 0 && self.energy_needed_kwh == 0.0
    }
}
