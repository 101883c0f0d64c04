//! Control-point derivation.
//!
//! Given the clinical landmarks for one ear and the sweep range, produce the
//! five points the curve is fitted through, in increasing pressure order:
//!
//! ```text
//! (min, baseline)  (left shoulder, Ytm/2)  (TPP, Ytm)  (right shoulder, Ytm/2)  (max, baseline)
//! ```
//!
//! The shoulders sit `tw / 2` daPa either side of the peak (integer floor
//! division, so an odd TW lands the pair 1 daPa asymmetric). When a nominal
//! shoulder falls outside the sweep range it is pulled one daPa inside the
//! boundary and the baseline at that boundary is raised to `Ytm/2` — the
//! curve's edge is then inside the descending slope rather than at baseline.
//!
//! A very wide TW combined with a narrow sweep can make both clamps fire and
//! break the left-to-right ordering; that geometry has no meaningful curve,
//! so it is rejected rather than handed to the fitter.

use crate::domain::{ClinicalInputs, ControlPoint, PointRole, SweepRange};
use crate::error::CurveError;

/// Derive the five control points for one ear.
pub fn build_control_points(
    inputs: &ClinicalInputs,
    sweep: &SweepRange,
) -> Result<[ControlPoint; 5], CurveError> {
    validate(inputs, sweep)?;

    let half_width = inputs.tw / 2;
    let mut left_shoulder = inputs.tpp - half_width;
    let mut right_shoulder = inputs.tpp + half_width;

    let mut baseline_left = 0.0;
    let mut baseline_right = 0.0;
    let half_peak = inputs.ytm / 2.0;

    if left_shoulder <= sweep.min_pressure {
        left_shoulder = sweep.min_pressure + 1;
        baseline_left = half_peak;
    }
    if right_shoulder >= sweep.max_pressure {
        right_shoulder = sweep.max_pressure - 1;
        baseline_right = half_peak;
    }

    let points = [
        ControlPoint {
            role: PointRole::LowerBound,
            pressure: sweep.min_pressure,
            admittance: baseline_left,
        },
        ControlPoint {
            role: PointRole::LeftShoulder,
            pressure: left_shoulder,
            admittance: half_peak,
        },
        ControlPoint {
            role: PointRole::Peak,
            pressure: inputs.tpp,
            admittance: inputs.ytm,
        },
        ControlPoint {
            role: PointRole::RightShoulder,
            pressure: right_shoulder,
            admittance: half_peak,
        },
        ControlPoint {
            role: PointRole::UpperBound,
            pressure: sweep.max_pressure,
            admittance: baseline_right,
        },
    ];

    ensure_strictly_increasing(&points)?;
    Ok(points)
}

fn validate(inputs: &ClinicalInputs, sweep: &SweepRange) -> Result<(), CurveError> {
    if sweep.min_pressure >= sweep.max_pressure {
        return Err(CurveError::InvalidInput(format!(
            "sweep range [{}, {}] daPa is empty or inverted.",
            sweep.min_pressure, sweep.max_pressure
        )));
    }
    if inputs.tw <= 0 {
        return Err(CurveError::InvalidInput(format!(
            "tympanometric width must be > 0 daPa (got {}).",
            inputs.tw
        )));
    }
    if !(inputs.ytm.is_finite() && inputs.ytm >= 0.0) {
        return Err(CurveError::InvalidInput(format!(
            "peak admittance must be finite and >= 0 mmho (got {}).",
            inputs.ytm
        )));
    }
    if inputs.tpp <= sweep.min_pressure || inputs.tpp >= sweep.max_pressure {
        return Err(CurveError::InvalidInput(format!(
            "peak pressure {} daPa must lie strictly inside the sweep range [{}, {}] daPa.",
            inputs.tpp, sweep.min_pressure, sweep.max_pressure
        )));
    }
    Ok(())
}

fn ensure_strictly_increasing(points: &[ControlPoint]) -> Result<(), CurveError> {
    for pair in points.windows(2) {
        if pair[0].pressure >= pair[1].pressure {
            return Err(CurveError::DegenerateControlPoints {
                first: pair[0].role,
                first_pressure: pair[0].pressure,
                second: pair[1].role,
                second_pressure: pair[1].pressure,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep() -> SweepRange {
        SweepRange {
            min_pressure: -200,
            max_pressure: 200,
        }
    }

    #[test]
    fn nominal_inputs_produce_expected_landmarks() {
        let inputs = ClinicalInputs {
            vea: 1.5,
            ytm: 1.0,
            tpp: -10,
            tw: 70,
        };
        let points = build_control_points(&inputs, &sweep()).unwrap();

        let expected = [(-200, 0.0), (-45, 0.5), (-10, 1.0), (25, 0.5), (200, 0.0)];
        for (point, (pressure, admittance)) in points.iter().zip(expected) {
            assert_eq!(point.pressure, pressure);
            assert_eq!(point.admittance, admittance);
        }
    }

    #[test]
    fn points_are_strictly_increasing_for_valid_inputs() {
        for tpp in [-150, -10, 0, 50, 150] {
            for tw in [2, 35, 70, 199] {
                let inputs = ClinicalInputs {
                    vea: 1.0,
                    ytm: 1.2,
                    tpp,
                    tw,
                };
                let points = build_control_points(&inputs, &sweep()).unwrap();
                for pair in points.windows(2) {
                    assert!(pair[0].pressure < pair[1].pressure);
                }
            }
        }
    }

    #[test]
    fn odd_width_keeps_floor_asymmetry() {
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: 0,
            tw: 71,
        };
        let points = build_control_points(&inputs, &sweep()).unwrap();
        // 71 / 2 floors to 35 on both sides.
        assert_eq!(points[1].pressure, -35);
        assert_eq!(points[3].pressure, 35);
    }

    #[test]
    fn left_clamp_raises_baseline_to_half_peak() {
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: -195,
            tw: 20,
        };
        let points = build_control_points(&inputs, &sweep()).unwrap();

        assert_eq!(points[0].pressure, -200);
        assert_eq!(points[0].admittance, 0.5);
        assert_eq!(points[1].pressure, -199);
        assert_eq!(points[1].admittance, 0.5);
        // Right side untouched.
        assert_eq!(points[4].admittance, 0.0);
    }

    #[test]
    fn right_clamp_uses_configured_upper_bound() {
        let narrow = SweepRange {
            min_pressure: -300,
            max_pressure: 100,
        };
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 2.0,
            tpp: 90,
            tw: 40,
        };
        let points = build_control_points(&inputs, &narrow).unwrap();

        assert_eq!(points[3].pressure, 99);
        assert_eq!(points[4].pressure, 100);
        assert_eq!(points[4].admittance, 1.0);
    }

    #[test]
    fn unit_width_collides_shoulders_with_peak() {
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: 0,
            tw: 1,
        };
        let err = build_control_points(&inputs, &sweep()).unwrap_err();
        assert!(matches!(err, CurveError::DegenerateControlPoints { .. }));
    }

    #[test]
    fn both_clamps_on_tiny_sweep_are_rejected() {
        let tiny = SweepRange {
            min_pressure: -1,
            max_pressure: 1,
        };
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: 0,
            tw: 10,
        };
        let err = build_control_points(&inputs, &tiny).unwrap_err();
        assert!(matches!(err, CurveError::DegenerateControlPoints { .. }));
    }

    #[test]
    fn peak_outside_sweep_is_invalid() {
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: -250,
            tw: 70,
        };
        let err = build_control_points(&inputs, &sweep()).unwrap_err();
        assert!(matches!(err, CurveError::InvalidInput(_)));
    }

    #[test]
    fn non_positive_width_is_invalid() {
        let inputs = ClinicalInputs {
            vea: 1.0,
            ytm: 1.0,
            tpp: 0,
            tw: 0,
        };
        let err = build_control_points(&inputs, &sweep()).unwrap_err();
        assert!(matches!(err, CurveError::InvalidInput(_)));
    }
}
