use serde::{Deserialize, Serialize};

use crate::ChargeType;

pub const AC_VOLTAGE: f64 = 220.0;
pub const AC_EFFICIENCY: f64 = 0.90;
pub const DC_EFFICIENCY: f64 = 0.94;
/// kWh per 100 km
pub const EV_CONSUMPTION_KWH_PER_100KM: f64 = 18.0;
/// L per 100 km
pub const GASOLINE_CONSUMPTION_L_PER_100KM: f64 = 8.0;
pub const CO2_KG_PER_LITER_GASOLINE: f64 = 2.3;
pub const DEFAULT_ELECTRICITY_PRICE: f64 = 2.5;
/// Rough price of the gasoline needed to cover the distance of one kWh.
pub const GASOLINE_PRICE_PER_KWH_EQUIVALENT: f64 = 8.0;
pub const TREE_CO2_ABSORPTION_KG_PER_YEAR: f64 = 20.0;
pub const GASOLINE_CAR_CO2_KG_PER_10KM: f64 = 2.3;

/// Net power below which a session is treated as not charging at all.
pub const MIN_NET_POWER_KW: f64 = 0.001;

/// Physical and financial constants used by the estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeConstants {
    pub ac_voltage: f64,
    pub ac_efficiency: f64,
    pub dc_efficiency: f64,
    #[serde(rename = "evConsumptionKWhPer100Km")]
    pub ev_consumption_kwh_per_100km: f64,
    #[serde(rename = "gasolineConsumptionLPer100Km")]
    pub gasoline_consumption_l_per_100km: f64,
    pub co2_kg_per_liter_gasoline: f64,
    #[serde(rename = "defaultElectricityPricePerKWh")]
    pub default_electricity_price: f64,
    #[serde(rename = "gasolinePricePerKWhEquivalent")]
    pub gasoline_price_per_kwh_equivalent: f64,
    pub tree_co2_absorption_kg_per_year: f64,
    #[serde(rename = "gasolineCarCo2KgPer10Km")]
    pub gasoline_car_co2_kg_per_10km: f64,
}

impl ChargeConstants {
    pub fn efficiency(&self, charge_type: ChargeType) -> f64 {
        match charge_type {
            ChargeType::Ac => self.ac_efficiency,
            ChargeType::Dc => self.dc_efficiency,
        }
    }

    /// Return the name of the first constant that is not a positive finite
    /// number, efficiencies also have to stay at or below 1.
    pub(crate) fn first_invalid(&self) -> Option<(&'static str, f64)> {
        let positive = [
            ("acVoltage", self.ac_voltage),
            (
                "evConsumptionKWhPer100Km",
                self.ev_consumption_kwh_per_100km,
            ),
            (
                "gasolineConsumptionLPer100Km",
                self.gasoline_consumption_l_per_100km,
            ),
            ("co2KgPerLiterGasoline", self.co2_kg_per_liter_gasoline),
            (
                "defaultElectricityPricePerKWh",
                self.default_electricity_price,
            ),
            (
                "gasolinePricePerKWhEquivalent",
                self.gasoline_price_per_kwh_equivalent,
            ),
            (
                "treeCo2AbsorptionKgPerYear",
                self.tree_co2_absorption_kg_per_year,
            ),
            ("gasolineCarCo2KgPer10Km", self.gasoline_car_co2_kg_per_10km),
        ];
        let ratios = [
            ("acEfficiency", self.ac_efficiency),
            ("dcEfficiency", self.dc_efficiency),
        ];

        positive
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
            .or_else(|| {
                ratios
                    .into_iter()
                    .find(|(_, value)| !(*value > 0.0 && *value <= 1.0))
            })
    }
}

impl Default for ChargeConstants {
    fn default() -> Self {
        ChargeConstants {
            ac_voltage: AC_VOLTAGE,
            ac_efficiency: AC_EFFICIENCY,
            dc_efficiency: DC_EFFICIENCY,
            ev_consumption_kwh_per_100km: EV_CONSUMPTION_KWH_PER_100KM,
            gasoline_consumption_l_per_100km: GASOLINE_CONSUMPTION_L_PER_100KM,
            co2_kg_per_liter_gasoline: CO2_KG_PER_LITER_GASOLINE,
            default_electricity_price: DEFAULT_ELECTRICITY_PRICE,
            gasoline_price_per_kwh_equivalent: GASOLINE_PRICE_PER_KWH_EQUIVALENT,
            tree_co2_absorption_kg_per_year: TREE_CO2_ABSORPTION_KG_PER_YEAR,
            gasoline_car_co2_kg_per_10km: GASOLINE_CAR_CO2_KG_PER_10KM,
        }
    }
}
