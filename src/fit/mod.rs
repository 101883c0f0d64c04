//! Curve computation core.
//!
//! Responsibilities:
//!
//! - derive the five (pressure, admittance) control points from the clinical
//!   landmarks, applying the boundary-clamp rules
//! - fit an exact RBF interpolant through the control points
//! - sample the interpolant densely across the sweep range

pub mod builder;
pub mod rbf;
pub mod sampler;

pub use builder::*;
pub use rbf::*;
pub use sampler::*;
