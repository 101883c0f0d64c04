//! Radial basis kernel evaluation.
//!
//! The fitter relies on a single primitive: evaluate `phi(r)` for a kernel
//! kind, a center distance `r`, and the shape parameter epsilon. Keeping the
//! kernels behind one dispatch point means the control-point builder and the
//! fitter never care which kernel is in use.
//!
//! Numerical notes:
//! - the thin-plate kernel `r^2 ln r` has the analytic limit 0 at `r → 0`;
//!   evaluating `ln` there would produce `-inf`, so we guard it.
//! - epsilon scaling applies to multiquadric and gaussian only; thin-plate
//!   has no shape parameter.

use crate::domain::KernelKind;

/// Evaluate `phi(r)` for the given kernel.
///
/// `r` is a distance, so callers pass non-negative values; epsilon is assumed
/// finite and positive (validated at the fit boundary).
pub fn phi(kernel: KernelKind, r: f64, epsilon: f64) -> f64 {
    match kernel {
        KernelKind::Multiquadric => ((r / epsilon).powi(2) + 1.0).sqrt(),
        KernelKind::Gaussian => (-(r / epsilon).powi(2)).exp(),
        KernelKind::ThinPlate => {
            if r.abs() < f64::EPSILON {
                0.0
            } else {
                r.powi(2) * r.ln()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiquadric_at_zero_distance_is_one() {
        assert!((phi(KernelKind::Multiquadric, 0.0, 25.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn multiquadric_at_epsilon_is_sqrt_two() {
        let v = phi(KernelKind::Multiquadric, 25.0, 25.0);
        assert!((v - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn gaussian_at_zero_distance_is_one() {
        assert!((phi(KernelKind::Gaussian, 0.0, 10.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn thin_plate_limit_at_zero() {
        assert_eq!(phi(KernelKind::ThinPlate, 0.0, 25.0), 0.0);
    }

    #[test]
    fn kernels_finite_on_typical_distances() {
        for kernel in [
            KernelKind::Multiquadric,
            KernelKind::Gaussian,
            KernelKind::ThinPlate,
        ] {
            for &r in &[0.0, 1.0, 35.0, 155.0, 400.0] {
                for &eps in &[1.0, 25.0, 75.0] {
                    assert!(phi(kernel, r, eps).is_finite());
                }
            }
        }
    }
}
