use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("Breakpoint at {soc_percent}% has multiplier {multiplier}, expected (0, 1]")]
    MultiplierOutOfRange { soc_percent: u8, multiplier: f64 },
    #[error("Breakpoint at {soc_percent}% is above 100%")]
    PercentOutOfRange { soc_percent: u8 },
    #[error("Breakpoint at {soc_percent}% appears more than once")]
    DuplicatePercent { soc_percent: u8 },
    #[error("Multiplier rises to {multiplier} at {soc_percent}%, the curve must taper")]
    RisingMultiplier {
        soc_percent: u8,
        previous: f64,
        multiplier: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveBreakpoint {
    pub soc_percent: u8,
    pub multiplier: f64,
}

/// DC power taper as a step function of the state of charge.
///
/// Breakpoints are kept sorted by percent, each percent appears once and
/// the multipliers never rise as the battery fills. The multiplier for a
/// given percent is the one of the greatest breakpoint at or below it,
/// there is no interpolation between breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveBreakpoint>", into = "Vec<CurveBreakpoint>")]
pub struct DcChargingCurve {
    breakpoints: Vec<CurveBreakpoint>,
}

impl DcChargingCurve {
    pub fn new(mut breakpoints: Vec<CurveBreakpoint>) -> Result<Self, CurveError> {
        for breakpoint in &breakpoints {
            if breakpoint.soc_percent > 100 {
                return Err(CurveError::PercentOutOfRange {
                    soc_percent: breakpoint.soc_percent,
                });
            }
            if !(breakpoint.multiplier > 0.0 && breakpoint.multiplier <= 1.0) {
                return Err(CurveError::MultiplierOutOfRange {
                    soc_percent: breakpoint.soc_percent,
                    multiplier: breakpoint.multiplier,
                });
            }
        }
        breakpoints.sort_by_key(|breakpoint| breakpoint.soc_percent);

        for pair in breakpoints.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            if current.soc_percent == previous.soc_percent {
                return Err(CurveError::DuplicatePercent {
                    soc_percent: current.soc_percent,
                });
            }
            if current.multiplier > previous.multiplier {
                return Err(CurveError::RisingMultiplier {
                    soc_percent: current.soc_percent,
                    previous: previous.multiplier,
                    multiplier: current.multiplier,
                });
            }
        }
        Ok(DcChargingCurve { breakpoints })
    }

    /// A curve with no breakpoints, which never tapers.
    pub fn flat() -> Self {
        DcChargingCurve {
            breakpoints: Vec::new(),
        }
    }

    pub fn breakpoints(&self) -> &[CurveBreakpoint] {
        &self.breakpoints
    }

    /// Return the multiplier that applies at `soc_percent`.
    ///
    /// Below the first breakpoint, or with an empty table, this is 1.0.
    pub fn multiplier(&self, soc_percent: u8) -> f64 {
        self.breakpoints
            .iter()
            .rev()
            .find(|breakpoint| soc_percent >= breakpoint.soc_percent)
            .map_or(1.0, |breakpoint| breakpoint.multiplier)
    }

    /// Average of the multipliers at both ends of a session.
    pub fn average_multiplier(&self, from_percent: u8, to_percent: u8) -> f64 {
        (self.multiplier(from_percent) + self.multiplier(to_percent)) / 2.0
    }
}

impl Default for DcChargingCurve {
    fn default() -> Self {
        let breakpoints = [
            (0, 1.0),
            (10, 1.0),
            (20, 1.0),
            (30, 1.0),
            (40, 1.0),
            (50, 0.95),
            (60, 0.85),
            (70, 0.70),
            (80, 0.50),
            (90, 0.25),
            (100, 0.10),
        ]
        .into_iter()
        .map(|(soc_percent, multiplier)| CurveBreakpoint {
            soc_percent,
            multiplier,
        })
        .collect();
        DcChargingCurve { breakpoints }
    }
}

impl TryFrom<Vec<CurveBreakpoint>> for DcChargingCurve {
    type Error = CurveError;

    fn try_from(breakpoints: Vec<CurveBreakpoint>) -> Result<Self, Self::Error> {
        DcChargingCurve::new(breakpoints)
    }
}

impl From<DcChargingCurve> for Vec<CurveBreakpoint> {
    fn from(curve: DcChargingCurve) -> Self {
        curve.breakpoints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakpoint(soc_percent: u8, multiplier: f64) -> CurveBreakpoint {
        CurveBreakpoint {
            soc_percent,
            multiplier,
        }
    }

    #[test]
    fn test_default_curve_steps() {
        let curve = DcChargingCurve::default();

        assert_eq!(curve.multiplier(0), 1.0);
        assert_eq!(curve.multiplier(20), 1.0);
        assert_eq!(curve.multiplier(49), 1.0);
        assert_eq!(curve.multiplier(50), 0.95);
        // No interpolation between 70 and 80
        assert_eq!(curve.multiplier(79), 0.70);
        assert_eq!(curve.multiplier(80), 0.50);
        assert_eq!(curve.multiplier(100), 0.10);
    }

    #[test]
    fn test_average_multiplier() {
        let curve = DcChargingCurve::default();
        assert_eq!(curve.average_multiplier(20, 80), 0.75);
    }

    #[test]
    fn test_below_first_breakpoint_and_empty_table() {
        let curve = DcChargingCurve::new(vec![breakpoint(30, 0.8)]).unwrap();
        assert_eq!(curve.multiplier(10), 1.0);
        assert_eq!(curve.multiplier(30), 0.8);

        let flat = DcChargingCurve::flat();
        assert_eq!(flat.multiplier(0), 1.0);
        assert_eq!(flat.multiplier(100), 1.0);
    }

    #[test]
    fn test_unsorted_breakpoints_are_sorted() {
        let curve = DcChargingCurve::new(vec![
            breakpoint(80, 0.5),
            breakpoint(0, 1.0),
            breakpoint(50, 0.9),
        ])
        .unwrap();

        let percents: Vec<u8> = curve.breakpoints().iter().map(|b| b.soc_percent).collect();
        assert_eq!(percents, vec![0, 50, 80]);
        assert_eq!(curve.multiplier(60), 0.9);
    }

    #[test]
    fn test_invalid_breakpoints() {
        let result = DcChargingCurve::new(vec![breakpoint(50, 0.0)]);
        assert_eq!(
            result,
            Err(CurveError::MultiplierOutOfRange {
                soc_percent: 50,
                multiplier: 0.0
            })
        );

        assert!(DcChargingCurve::new(vec![breakpoint(50, 1.2)]).is_err());
        let not_a_number = breakpoint(50, f64::NAN);
        assert!(DcChargingCurve::new(vec![not_a_number]).is_err());
        assert_eq!(
            DcChargingCurve::new(vec![breakpoint(120, 0.5)]),
            Err(CurveError::PercentOutOfRange { soc_percent: 120 })
        );

        // A curve that rises again would let a higher target finish sooner
        assert_eq!(
            DcChargingCurve::new(vec![breakpoint(0, 0.5), breakpoint(50, 1.0)]),
            Err(CurveError::RisingMultiplier {
                soc_percent: 50,
                previous: 0.5,
                multiplier: 1.0
            })
        );
        assert_eq!(
            DcChargingCurve::new(vec![
                breakpoint(80, 0.5),
                breakpoint(0, 1.0),
                breakpoint(80, 0.4),
            ]),
            Err(CurveError::DuplicatePercent { soc_percent: 80 })
        );

        // Equal neighbours are a plateau, not a rise
        let plateau = vec![breakpoint(0, 0.8), breakpoint(50, 0.8)];
        assert!(DcChargingCurve::new(plateau).is_ok());
    }

    #[test]
    fn test_curve_json_deserialization() {
        let json = r#"[
            {"socPercent": 90, "multiplier": 0.3},
            {"socPercent": 0, "multiplier": 1.0}
        ]"#;

        let curve: DcChargingCurve = serde_json::from_str(json).unwrap();
        assert_eq!(curve.breakpoints()[0].soc_percent, 0);
        assert_eq!(curve.multiplier(95), 0.3);

        let invalid = r#"[{"socPercent": 10, "multiplier": -1}]"#;
        assert!(serde_json::from_str::<DcChargingCurve>(invalid).is_err());
    }
}
