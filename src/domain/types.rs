//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during curve computation
//! - handed to rendering front-ends (terminal plot, TUI chart)
//! - embedded in other tools later without dragging UI code along

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which ear a curve belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Ear {
    Left,
    Right,
}

impl Ear {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Ear::Left => "left",
            Ear::Right => "right",
        }
    }
}

/// Radial basis kernel used to fit the curve through the control points.
///
/// Multiquadric is the clinical default; the alternatives share the same
/// fitting machinery and only change the kernel evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum KernelKind {
    /// `phi(r) = sqrt((r/eps)^2 + 1)`
    Multiquadric,
    /// `phi(r) = exp(-(r/eps)^2)`
    Gaussian,
    /// `phi(r) = r^2 ln r` (shape parameter unused)
    ThinPlate,
}

impl KernelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            KernelKind::Multiquadric => "multiquadric",
            KernelKind::Gaussian => "gaussian",
            KernelKind::ThinPlate => "thin-plate",
        }
    }
}

/// Role of a control point on the tympanogram.
///
/// The five points are always emitted in this order, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    /// Curve start at the negative end of the sweep.
    LowerBound,
    /// Half-peak admittance point left of the peak.
    LeftShoulder,
    /// Tympanometric peak (TPP, Ytm).
    Peak,
    /// Half-peak admittance point right of the peak.
    RightShoulder,
    /// Curve end at the positive end of the sweep.
    UpperBound,
}

impl PointRole {
    /// Human-readable label for terminal output and error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            PointRole::LowerBound => "lower bound",
            PointRole::LeftShoulder => "left shoulder",
            PointRole::Peak => "peak",
            PointRole::RightShoulder => "right shoulder",
            PointRole::UpperBound => "upper bound",
        }
    }
}

/// The five clinical landmark values entered for one ear.
///
/// Pressures are integers in daPa (matching the entry forms, which step by
/// 1 daPa); admittances are in mmho.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClinicalInputs {
    /// Equivalent ear-canal volume (mmho). Reported in the annotation only;
    /// it does not shape the curve.
    pub vea: f64,
    /// Peak compensated static admittance (mmho) — the curve's maximum height.
    pub ytm: f64,
    /// Tympanometric peak pressure (daPa).
    pub tpp: i32,
    /// Tympanometric width (daPa) — pressure span between the two half-peak
    /// admittance points.
    pub tw: i32,
}

/// The pressure interval the curve is drawn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRange {
    /// Negative end of the sweep (daPa).
    pub min_pressure: i32,
    /// Positive end of the sweep (daPa). Must be greater than `min_pressure`.
    pub max_pressure: i32,
}

impl SweepRange {
    /// Width of the sweep in daPa.
    pub fn span(&self) -> i32 {
        self.max_pressure - self.min_pressure
    }
}

/// One of the five (pressure, admittance) landmarks the curve is fitted through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub role: PointRole,
    pub pressure: i32,
    pub admittance: f64,
}

/// One point of the dense fitted polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveSample {
    pub pressure: f64,
    pub admittance: f64,
}

/// How the fitted curve is sampled across the sweep range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingPolicy {
    /// One sample per daPa, endpoints inclusive: `span + 1` samples.
    UnitStep,
    /// A fixed number of evenly spaced samples, endpoints inclusive.
    Count(usize),
}

/// Per-ear settings: the clinical landmarks plus the kernel shape parameter.
///
/// Epsilon tunes the interpolant's curvature between the landmarks; it never
/// moves the landmarks themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarSettings {
    pub inputs: ClinicalInputs,
    pub epsilon: f64,
}

/// A full draw request as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults) or edited live in the TUI.
#[derive(Debug, Clone)]
pub struct DrawConfig {
    pub sweep: SweepRange,
    pub kernel: KernelKind,
    pub sampling: SamplingPolicy,

    pub left: EarSettings,
    /// Present only for dual-ear draws; each ear is computed independently.
    pub right: Option<EarSettings>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// Computed output for a single ear.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EarCurve {
    pub ear: Ear,
    pub inputs: ClinicalInputs,
    pub epsilon: f64,
    /// The five landmarks, in strictly increasing pressure order
    /// (for marker rendering).
    pub control_points: [ControlPoint; 5],
    /// Dense fitted polyline across the sweep range (for line rendering).
    pub samples: Vec<CurveSample>,
    /// Human-readable summary of the clinical inputs, for annotation display.
    pub annotation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_span_basic() {
        let sweep = SweepRange {
            min_pressure: -200,
            max_pressure: 200,
        };
        assert_eq!(sweep.span(), 400);
    }
}
