//! Charge estimation core.
//!
//! Pure computation only: a vehicle catalog, the DC charging curve, and the
//! estimator turning a vehicle and a session configuration into time,
//! energy, cost and CO2 figures. Nothing in this crate holds state or
//! performs I/O.

mod catalog;
mod comparison;
mod config;
pub mod constants;
mod curve;
mod estimator;
mod models;

pub use crate::catalog::{CatalogError, VehicleCatalog, builtin_vehicles};
pub use crate::comparison::{
    AmperageOption, Co2Equivalents, CostComparison, StationOption, amperage_options,
    dc_station_options,
};
pub use crate::config::{CalculatorConfig, ConfigError, SessionDefaults};
pub use crate::constants::ChargeConstants;
pub use crate::curve::{CurveBreakpoint, CurveError, DcChargingCurve};
pub use crate::estimator::{Estimator, estimate};
pub use crate::models::*;
