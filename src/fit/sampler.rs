//! Dense sampling of the fitted curve.
//!
//! Two sampling policies are supported, matching the two conventions the
//! entry forms use:
//!
//! - unit step: one sample per daPa across the sweep, endpoints inclusive
//!   (`span + 1` samples — e.g. 401 over [-200, 200])
//! - fixed count: `n` evenly spaced samples, endpoints inclusive
//!
//! Samples never extend past the sweep range, and a non-finite evaluation
//! anywhere aborts the whole draw rather than returning a partial polyline.

use crate::domain::{CurveSample, SamplingPolicy, SweepRange};
use crate::error::CurveError;
use crate::fit::RbfCurve;

/// Build the pressure grid for the given policy.
pub fn pressure_grid(sweep: &SweepRange, policy: SamplingPolicy) -> Vec<f64> {
    match policy {
        SamplingPolicy::UnitStep => (sweep.min_pressure..=sweep.max_pressure)
            .map(f64::from)
            .collect(),
        SamplingPolicy::Count(n) => {
            let n = n.max(2);
            let p0 = f64::from(sweep.min_pressure);
            let p1 = f64::from(sweep.max_pressure);
            (0..n)
                .map(|i| {
                    let u = i as f64 / (n as f64 - 1.0);
                    p0 + u * (p1 - p0)
                })
                .collect()
        }
    }
}

/// Evaluate the fitted curve on the sampling grid.
pub fn sample_curve(
    curve: &RbfCurve,
    sweep: &SweepRange,
    policy: SamplingPolicy,
) -> Result<Vec<CurveSample>, CurveError> {
    let grid = pressure_grid(sweep, policy);
    let mut samples = Vec::with_capacity(grid.len());

    for pressure in grid {
        let admittance = curve.eval(pressure);
        if !admittance.is_finite() {
            return Err(CurveError::FitFailed(format!(
                "non-finite admittance at {pressure} daPa."
            )));
        }
        samples.push(CurveSample {
            pressure,
            admittance,
        });
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClinicalInputs, KernelKind};
    use crate::fit::build_control_points;

    fn sweep() -> SweepRange {
        SweepRange {
            min_pressure: -200,
            max_pressure: 200,
        }
    }

    #[test]
    fn unit_step_grid_covers_every_dapa() {
        let grid = pressure_grid(&sweep(), SamplingPolicy::UnitStep);
        assert_eq!(grid.len(), 401);
        assert_eq!(grid[0], -200.0);
        assert_eq!(grid[grid.len() - 1], 200.0);
        assert_eq!(grid[1] - grid[0], 1.0);
    }

    #[test]
    fn fixed_count_grid_includes_endpoints() {
        let grid = pressure_grid(&sweep(), SamplingPolicy::Count(401));
        assert_eq!(grid.len(), 401);
        assert!((grid[0] - -200.0).abs() < 1e-12);
        assert!((grid[400] - 200.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_count_is_widened_to_two() {
        let grid = pressure_grid(&sweep(), SamplingPolicy::Count(1));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn samples_stay_inside_sweep_and_finite() {
        let inputs = ClinicalInputs {
            vea: 1.5,
            ytm: 1.0,
            tpp: -10,
            tw: 70,
        };
        let points = build_control_points(&inputs, &sweep()).unwrap();
        let curve = RbfCurve::fit(&points, KernelKind::Multiquadric, 25.0).unwrap();

        let samples = sample_curve(&curve, &sweep(), SamplingPolicy::UnitStep).unwrap();
        assert_eq!(samples.len(), 401);
        for s in &samples {
            assert!(s.pressure >= -200.0 && s.pressure <= 200.0);
            assert!(s.admittance.is_finite());
        }
    }
}
