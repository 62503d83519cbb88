use chrono::{DateTime, Duration, Utc};

use crate::constants::MIN_NET_POWER_KW;
use crate::{
    CalculationResult, ChargeConstants, ChargeMode, ChargeSessionConfig, DcChargingCurve,
    VehicleSpec,
};

/// Stateless charge estimator over a fixed DC curve and constant table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Estimator {
    curve: DcChargingCurve,
    constants: ChargeConstants,
}

impl Estimator {
    pub fn new(curve: DcChargingCurve, constants: ChargeConstants) -> Self {
        Estimator { curve, constants }
    }

    pub fn curve(&self) -> &DcChargingCurve {
        &self.curve
    }

    pub fn constants(&self) -> &ChargeConstants {
        &self.constants
    }

    /// Estimate a charging session for `spec`.
    ///
    /// The result only depends on the arguments, the finish time is derived
    /// from `config.start_time` and never from the clock. Degenerate inputs
    /// (nothing to charge, no usable power) give the zero-session result.
    pub fn estimate(&self, spec: &VehicleSpec, config: &ChargeSessionConfig) -> CalculationResult {
        let efficiency = self.constants.efficiency(config.charge_mode.charge_type());

        if config.target_percent <= config.current_percent {
            return CalculationResult::zero_session(efficiency, config.start_time);
        }

        let energy_needed = f64::from(config.target_percent - config.current_percent) / 100.0
            * spec.battery_capacity_kwh;
        let gross_power = self.gross_power(spec, config);
        let net_power = gross_power * efficiency;

        if !net_power.is_finite() || net_power < MIN_NET_POWER_KW {
            return CalculationResult::zero_session(efficiency, config.start_time);
        }

        let duration_minutes = (energy_needed / net_power * 60.0).round() as u32;

        CalculationResult {
            energy_needed_kwh: energy_needed,
            gross_power_kw: gross_power,
            net_power_kw: net_power,
            loss_power_kw: gross_power - net_power,
            efficiency_ratio: efficiency,
            duration_minutes,
            finish_time: finish_time(config.start_time, duration_minutes),
            cost_currency: energy_needed * config.electricity_price_per_kwh,
            co2_saved_kg: self.co2_saved(energy_needed),
        }
    }

    /// Power drawn from the charger, before losses.
    fn gross_power(&self, spec: &VehicleSpec, config: &ChargeSessionConfig) -> f64 {
        match config.charge_mode {
            ChargeMode::Ac {
                amperage,
                phase_count,
            } => {
                let requested =
                    amperage * self.constants.ac_voltage * f64::from(phase_count.count()) / 1000.0;
                requested.min(spec.max_ac_power_kw)
            }
            ChargeMode::Dc { station_power_kw } => {
                let station_power = station_power_kw.min(spec.max_dc_power_kw);
                station_power
                    * self
                        .curve
                        .average_multiplier(config.current_percent, config.target_percent)
            }
        }
    }

    /// CO2 a gasoline car would emit to cover the range of `energy_kwh`.
    fn co2_saved(&self, energy_kwh: f64) -> f64 {
        let ev_range_km = energy_kwh / self.constants.ev_consumption_kwh_per_100km * 100.0;
        let gasoline_liters = ev_range_km / 100.0 * self.constants.gasoline_consumption_l_per_100km;
        gasoline_liters * self.constants.co2_kg_per_liter_gasoline
    }
}

fn finish_time(start_time: DateTime<Utc>, duration_minutes: u32) -> DateTime<Utc> {
    start_time
        .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Estimate with the built-in DC curve and constants.
pub fn estimate(spec: &VehicleSpec, config: &ChargeSessionConfig) -> CalculationResult {
    Estimator::default().estimate(spec, config)
}
