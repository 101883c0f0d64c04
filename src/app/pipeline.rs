//! Shared "draw pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! landmarks -> control points -> RBF fit -> dense samples -> annotation
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//!
//! Each ear is computed independently from its own settings; there is no
//! shared state between ears or between successive draws.

use crate::domain::{DrawConfig, Ear, EarCurve, EarSettings};
use crate::error::{AppError, CurveError};
use crate::fit::{build_control_points, sample_curve, RbfCurve};
use crate::report::format_ear_annotation;

/// All computed outputs of a single draw.
#[derive(Debug, Clone)]
pub struct DrawOutput {
    /// One entry per configured ear, left first.
    pub ears: Vec<EarCurve>,
}

/// Execute the full draw pipeline and return the computed curves.
pub fn run_draw(config: &DrawConfig) -> Result<DrawOutput, AppError> {
    let mut ears = Vec::with_capacity(2);

    ears.push(compute_ear_curve(Ear::Left, &config.left, config)?);
    if let Some(right) = &config.right {
        ears.push(compute_ear_curve(Ear::Right, right, config)?);
    }

    Ok(DrawOutput { ears })
}

/// Compute the curve for a single ear.
///
/// Returns [`CurveError`] so interactive callers can surface the message
/// without tearing the whole application down.
pub fn compute_ear_curve(
    ear: Ear,
    settings: &EarSettings,
    config: &DrawConfig,
) -> Result<EarCurve, CurveError> {
    let control_points = build_control_points(&settings.inputs, &config.sweep)?;
    let curve = RbfCurve::fit(&control_points, config.kernel, settings.epsilon)?;
    let samples = sample_curve(&curve, &config.sweep, config.sampling)?;
    let annotation = format_ear_annotation(ear, &settings.inputs);

    Ok(EarCurve {
        ear,
        inputs: settings.inputs,
        epsilon: settings.epsilon,
        control_points,
        samples,
        annotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClinicalInputs, KernelKind, SamplingPolicy, SweepRange};

    fn base_config() -> DrawConfig {
        DrawConfig {
            sweep: SweepRange {
                min_pressure: -200,
                max_pressure: 200,
            },
            kernel: KernelKind::Multiquadric,
            sampling: SamplingPolicy::UnitStep,
            left: EarSettings {
                inputs: ClinicalInputs {
                    vea: 1.5,
                    ytm: 1.0,
                    tpp: -10,
                    tw: 70,
                },
                epsilon: 25.0,
            },
            right: None,
            plot: false,
            plot_width: 100,
            plot_height: 25,
        }
    }

    #[test]
    fn end_to_end_scenario_matches_landmarks() {
        let run = run_draw(&base_config()).unwrap();
        assert_eq!(run.ears.len(), 1);

        let ear = &run.ears[0];
        let expected = [(-200, 0.0), (-45, 0.5), (-10, 1.0), (25, 0.5), (200, 0.0)];
        for (point, (pressure, admittance)) in ear.control_points.iter().zip(expected) {
            assert_eq!(point.pressure, pressure);
            assert_eq!(point.admittance, admittance);
        }

        // Unit-step sampling over [-200, 200]: 401 samples, and the sample at
        // the peak pressure reproduces Ytm.
        assert_eq!(ear.samples.len(), 401);
        let at_peak = ear
            .samples
            .iter()
            .find(|s| s.pressure == -10.0)
            .expect("peak pressure is on the unit grid");
        assert!((at_peak.admittance - 1.0).abs() < 1e-6);
    }

    #[test]
    fn curve_is_smooth_across_the_sweep() {
        let run = run_draw(&base_config()).unwrap();
        let samples = &run.ears[0].samples;

        for pair in samples.windows(2) {
            let step = (pair[1].admittance - pair[0].admittance).abs();
            assert!(step < 0.1, "jump of {step} at {} daPa", pair[0].pressure);
        }
    }

    #[test]
    fn identical_draws_are_identical() {
        let config = base_config();
        let a = run_draw(&config).unwrap();
        let b = run_draw(&config).unwrap();

        assert_eq!(a.ears.len(), b.ears.len());
        for (ea, eb) in a.ears.iter().zip(b.ears.iter()) {
            assert_eq!(ea.control_points, eb.control_points);
            assert_eq!(ea.samples, eb.samples);
            assert_eq!(ea.annotation, eb.annotation);
        }
    }

    #[test]
    fn ears_are_computed_independently() {
        let mut config = base_config();
        config.right = Some(EarSettings {
            inputs: ClinicalInputs {
                vea: 1.5,
                ytm: 2.0,
                tpp: 10,
                tw: 120,
            },
            epsilon: 40.0,
        });

        let dual = run_draw(&config).unwrap();
        assert_eq!(dual.ears.len(), 2);
        assert_eq!(dual.ears[0].ear, Ear::Left);
        assert_eq!(dual.ears[1].ear, Ear::Right);

        // Adding a right ear must not perturb the left ear's output.
        let single = run_draw(&base_config()).unwrap();
        assert_eq!(single.ears[0].samples, dual.ears[0].samples);
        assert_eq!(single.ears[0].control_points, dual.ears[0].control_points);
    }

    #[test]
    fn fixed_count_sampling_is_honored() {
        let mut config = base_config();
        config.sampling = SamplingPolicy::Count(401);

        let run = run_draw(&config).unwrap();
        assert_eq!(run.ears[0].samples.len(), 401);
    }

    #[test]
    fn degenerate_width_fails_the_draw() {
        let mut config = base_config();
        config.left.inputs.tw = 1;

        let err = run_draw(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
