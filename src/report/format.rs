//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the curve/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{ClinicalInputs, ControlPoint, DrawConfig, Ear, EarCurve, SamplingPolicy};

/// Format the clinical annotation for one ear.
///
/// This is the summary string shown next to the curve, mirroring how the
/// values are read back in the clinic.
pub fn format_ear_annotation(ear: Ear, inputs: &ClinicalInputs) -> String {
    let mut out = String::new();
    out.push_str(&format!("Compensated {} ear:\n", ear.display_name()));
    out.push_str(&format!("Vea = {} mmho\n", inputs.vea));
    out.push_str(&format!("Ytm = {} mmho\n", inputs.ytm));
    out.push_str(&format!("TPP = {} daPa\n", inputs.tpp));
    out.push_str(&format!("TW = {} daPa\n", inputs.tw));
    out
}

/// Format the control-point table for one ear.
pub fn format_control_points(points: &[ControlPoint]) -> String {
    let mut out = String::new();
    out.push_str("role            pressure(daPa)  admittance(mmho)\n");
    for p in points {
        out.push_str(&format!(
            "{:<15} {:>14} {:>17.3}\n",
            p.role.display_name(),
            p.pressure,
            p.admittance
        ));
    }
    out
}

/// Format the full run summary (configuration + per-ear annotation, control
/// points, and sample stats).
pub fn format_run_summary(ears: &[EarCurve], config: &DrawConfig) -> String {
    let mut out = String::new();

    out.push_str("=== tymp - Tympanogram curves ===\n");
    out.push_str(&format!(
        "Sweep: [{}, {}] daPa\n",
        config.sweep.min_pressure, config.sweep.max_pressure
    ));
    out.push_str(&format!("Kernel: {}\n", config.kernel.display_name()));
    out.push_str(&format!(
        "Sampling: {}\n",
        match config.sampling {
            SamplingPolicy::UnitStep => format!("unit step ({} samples)", config.sweep.span() + 1),
            SamplingPolicy::Count(n) => format!("{n} samples"),
        }
    ));

    for ear in ears {
        out.push('\n');
        out.push_str(&format_ear_annotation(ear.ear, &ear.inputs));
        out.push_str(&format!("epsilon = {}\n", ear.epsilon));
        out.push_str(&format_control_points(&ear.control_points));
        out.push_str(&format!(
            "samples: n={} | admittance=[{:.3}, {:.3}] mmho\n",
            ear.samples.len(),
            min_admittance(ear),
            max_admittance(ear),
        ));
    }

    out
}

fn min_admittance(ear: &EarCurve) -> f64 {
    ear.samples
        .iter()
        .map(|s| s.admittance)
        .fold(f64::INFINITY, f64::min)
}

fn max_admittance(ear: &EarCurve) -> f64 {
    ear.samples
        .iter()
        .map(|s| s.admittance)
        .fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_reads_like_the_clinic_summary() {
        let inputs = ClinicalInputs {
            vea: 1.5,
            ytm: 1.0,
            tpp: -10,
            tw: 70,
        };
        let text = format_ear_annotation(Ear::Left, &inputs);

        assert!(text.starts_with("Compensated left ear:"));
        assert!(text.contains("Vea = 1.5 mmho"));
        assert!(text.contains("Ytm = 1 mmho"));
        assert!(text.contains("TPP = -10 daPa"));
        assert!(text.contains("TW = 70 daPa"));
    }

    #[test]
    fn control_point_table_lists_all_roles() {
        use crate::domain::{PointRole, SweepRange};
        use crate::fit::build_control_points;

        let inputs = ClinicalInputs {
            vea: 1.5,
            ytm: 1.0,
            tpp: -10,
            tw: 70,
        };
        let sweep = SweepRange {
            min_pressure: -200,
            max_pressure: 200,
        };
        let points = build_control_points(&inputs, &sweep).unwrap();
        let table = format_control_points(&points);

        for role in [
            PointRole::LowerBound,
            PointRole::LeftShoulder,
            PointRole::Peak,
            PointRole::RightShoulder,
            PointRole::UpperBound,
        ] {
            assert!(table.contains(role.display_name()));
        }
    }
}
