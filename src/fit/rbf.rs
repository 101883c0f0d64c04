//! Exact RBF interpolation through the control points.
//!
//! Standard radial-basis interpolation in one dimension: with centers `x_i`
//! and values `y_i`, solve the square system
//!
//! ```text
//! Phi · w = y      where Phi_ij = phi(|x_i - x_j|)
//! ```
//!
//! and evaluate `f(x) = sum_i w_i · phi(|x - x_i|)`. The interpolant passes
//! exactly through every control point; epsilon reshapes the curve between
//! them without moving them.
//!
//! Two failure modes are detected rather than propagated as garbage:
//!
//! - coincident center pressures make `Phi` singular; rejected up front with
//!   the offending pair named
//! - SVD produces a minimum-norm answer even for a rank-deficient system, so
//!   after solving we verify the weights actually reproduce the control
//!   points before accepting the fit

use nalgebra::{DMatrix, DVector};

use crate::domain::{ControlPoint, KernelKind};
use crate::error::CurveError;
use crate::math::solve_square_system;
use crate::models::phi;

/// Tolerance for the post-solve reproduction check at the centers.
///
/// Admittances are a few mmho at most, so this is far above solver noise for
/// a healthy 5×5 system and far below any clinically visible deviation.
const REPRODUCTION_TOL: f64 = 1e-6;

/// A fitted interpolant for one ear's curve.
#[derive(Debug, Clone)]
pub struct RbfCurve {
    kernel: KernelKind,
    epsilon: f64,
    centers: Vec<f64>,
    weights: Vec<f64>,
}

impl RbfCurve {
    /// Fit an interpolant through the given control points.
    pub fn fit(
        points: &[ControlPoint],
        kernel: KernelKind,
        epsilon: f64,
    ) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::InvalidInput(format!(
                "need at least 2 control points to fit a curve (got {}).",
                points.len()
            )));
        }
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(CurveError::InvalidInput(format!(
                "epsilon must be finite and > 0 (got {epsilon})."
            )));
        }
        ensure_distinct_centers(points)?;

        let n = points.len();
        let centers: Vec<f64> = points.iter().map(|p| f64::from(p.pressure)).collect();
        let values: Vec<f64> = points.iter().map(|p| p.admittance).collect();

        let mut system = DMatrix::<f64>::zeros(n, n);
        for i in 0..n {
            for j in 0..n {
                let r = (centers[i] - centers[j]).abs();
                system[(i, j)] = phi(kernel, r, epsilon);
            }
        }
        let y = DVector::from_row_slice(&values);

        let weights = solve_square_system(&system, &y).ok_or_else(|| {
            CurveError::FitFailed(format!(
                "interpolation system is singular for kernel {} with epsilon {epsilon}.",
                kernel.display_name()
            ))
        })?;

        let curve = Self {
            kernel,
            epsilon,
            centers,
            weights: weights.iter().copied().collect(),
        };

        // Rank-deficient systems "solve" without interpolating; reject them.
        for point in points {
            let fitted = curve.eval(f64::from(point.pressure));
            if !fitted.is_finite() || (fitted - point.admittance).abs() > REPRODUCTION_TOL {
                return Err(CurveError::FitFailed(format!(
                    "fitted curve does not reproduce the {} point at {} daPa \
                     (expected {}, got {fitted}); the system is ill-conditioned.",
                    point.role.display_name(),
                    point.pressure,
                    point.admittance,
                )));
            }
        }

        Ok(curve)
    }

    /// Evaluate the interpolant at a pressure (daPa).
    pub fn eval(&self, pressure: f64) -> f64 {
        self.centers
            .iter()
            .zip(self.weights.iter())
            .map(|(&center, &weight)| weight * phi(self.kernel, (pressure - center).abs(), self.epsilon))
            .sum()
    }

    pub fn kernel(&self) -> KernelKind {
        self.kernel
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

fn ensure_distinct_centers(points: &[ControlPoint]) -> Result<(), CurveError> {
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            if points[i].pressure == points[j].pressure {
                return Err(CurveError::DegenerateControlPoints {
                    first: points[i].role,
                    first_pressure: points[i].pressure,
                    second: points[j].role,
                    second_pressure: points[j].pressure,
                });
            }
        }
    }
    Ok(())
}
