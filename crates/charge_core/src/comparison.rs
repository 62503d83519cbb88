//! Figures derived from an estimate for display next to it: what the same
//! distance would cost and emit with a gasoline car, and the charger
//! settings a user can pick from.

use serde::{Deserialize, Serialize};

use crate::ChargeConstants;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostComparison {
    pub electricity_cost: f64,
    pub gasoline_cost: f64,
    /// Negative when charging costs more than gasoline.
    pub savings: f64,
}

impl CostComparison {
    pub fn new(energy_kwh: f64, price_per_kwh: f64, constants: &ChargeConstants) -> Self {
        let electricity_cost = energy_kwh * price_per_kwh;
        let gasoline_cost = energy_kwh * constants.gasoline_price_per_kwh_equivalent;
        CostComparison {
            electricity_cost,
            gasoline_cost,
            savings: gasoline_cost - electricity_cost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Co2Equivalents {
    /// Trees needed to absorb the same CO2 over a year.
    pub trees_per_year: u32,
    /// Distance a gasoline car covers while emitting the same CO2.
    pub gasoline_car_km: u32,
}

impl Co2Equivalents {
    pub fn from_co2(co2_kg: f64, constants: &ChargeConstants) -> Self {
        Co2Equivalents {
            trees_per_year: (co2_kg / constants.tree_co2_absorption_kg_per_year).ceil() as u32,
            gasoline_car_km: (co2_kg / constants.gasoline_car_co2_kg_per_10km * 10.0).round()
                as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmperageOption {
    pub amperage: u32,
    /// Single phase power for this amperage.
    #[serde(rename = "powerKW")]
    pub power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationOption {
    #[serde(rename = "powerKW")]
    pub power_kw: f64,
    pub tier: String,
}

/// Selectable AC amperages: 6 to 16 A by 1 A, then up to 32 A by 4 A.
pub fn amperage_options(ac_voltage: f64) -> Vec<AmperageOption> {
    (6..=16)
        .chain((20..=32).step_by(4))
        .map(|amperage| AmperageOption {
            amperage,
            power_kw: f64::from(amperage) * ac_voltage / 1000.0,
        })
        .collect()
}

/// Common DC station ratings.
pub fn dc_station_options() -> Vec<StationOption> {
    [
        (50.0, "Standard"),
        (100.0, "Fast"),
        (150.0, "Ultra"),
        (200.0, "Super"),
        (250.0, "Hyper"),
        (350.0, "Max"),
    ]
    .into_iter()
    .map(|(power_kw, tier)| StationOption {
        power_kw,
        tier: tier.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_comparison() {
        let comparison = CostComparison::new(48.0, 2.5, &ChargeConstants::default());

        assert_eq!(comparison.electricity_cost, 120.0);
        assert_eq!(comparison.gasoline_cost, 384.0);
        assert_eq!(comparison.savings, 264.0);
    }

    #[test]
    fn test_expensive_electricity_gives_negative_savings() {
        let comparison = CostComparison::new(10.0, 9.0, &ChargeConstants::default());
        assert!(comparison.savings < 0.0);
    }

    #[test]
    fn test_co2_equivalents() {
        let constants = ChargeConstants::default();

        let equivalents = Co2Equivalents::from_co2(49.07, &constants);
        assert_eq!(equivalents.trees_per_year, 3);
        assert_eq!(equivalents.gasoline_car_km, 213);

        let none = Co2Equivalents::from_co2(0.0, &constants);
        assert_eq!(none.trees_per_year, 0);
        assert_eq!(none.gasoline_car_km, 0);
    }

    #[test]
    fn test_amperage_options() {
        let options = amperage_options(220.0);
        let amperages: Vec<u32> = options.iter().map(|o| o.amperage).collect();

        assert_eq!(
            amperages,
            vec![6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 20, 24, 28, 32]
        );
        assert!((options[10].power_kw - 3.52).abs() < 1e-9);
    }

    #[test]
    fn test_dc_station_options() {
        let options = dc_station_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options[2].power_kw, 150.0);
        assert_eq!(options[2].tier, "Ultra");
    }
}
