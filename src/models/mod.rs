//! Kernel evaluation for the supported radial basis functions.

pub mod kernel;

pub use kernel::*;
