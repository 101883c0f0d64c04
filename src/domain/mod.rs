//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input configuration enums (`Ear`, `KernelKind`, `SamplingPolicy`)
//! - clinical landmark inputs (`ClinicalInputs`, `SweepRange`)
//! - curve outputs (`ControlPoint`, `CurveSample`, `EarCurve`)

pub mod types;

pub use types::*;
