//! Mathematical utilities: the interpolation-system solver.

pub mod solve;

pub use solve::*;
