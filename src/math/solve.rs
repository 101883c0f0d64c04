//! Dense linear solver for the interpolation system.
//!
//! The RBF fit reduces to one small square system per ear:
//!
//! ```text
//! Phi · w = y      (Phi_ij = phi(|x_i - x_j|), 5×5 here)
//! ```
//!
//! Implementation choices:
//! - We solve via SVD. The system is tiny, so robustness matters far more
//!   than speed, and SVD degrades gracefully when a kernel/epsilon pairing
//!   makes the matrix nearly singular.
//! - SVD will happily produce a minimum-norm answer for a rank-deficient
//!   matrix, so a `Some` result does NOT guarantee the weights interpolate;
//!   callers must verify reproduction at the centers.

use nalgebra::{DMatrix, DVector};

/// Solve a square linear system using SVD.
///
/// Returns `None` if no finite solution is produced at any tolerance.
pub fn solve_square_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = a.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(w) = svd.solve(b, tol) {
            if w.iter().all(|v| v.is_finite()) {
                return Some(w);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solves_simple_system() {
        // [2 0; 0 4] w = [2, 8] -> w = [1, 2]
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let b = DVector::from_row_slice(&[2.0, 8.0]);

        let w = solve_square_system(&a, &b).unwrap();
        assert!((w[0] - 1.0).abs() < 1e-10);
        assert!((w[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn rank_deficient_system_still_needs_caller_verification() {
        // Two identical rows with inconsistent right-hand sides: SVD returns a
        // least-squares answer that cannot satisfy both equations.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let b = DVector::from_row_slice(&[1.0, 3.0]);

        let w = solve_square_system(&a, &b).unwrap();
        let residual = (&a * &w) - &b;
        assert!(residual.amax() > 0.5);
    }
}
