//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - left ear curve: `-` line
//! - right ear curve: `=` line
//! - control points: `o`

use crate::domain::{Ear, EarCurve};

/// Render the curve(s) of a draw into a fixed character grid.
pub fn render_ascii_plot(ears: &[EarCurve], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (p_min, p_max) = pressure_range(ears).unwrap_or((-200.0, 200.0));
    let (y_min, y_max) = admittance_range(ears).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so markers can overlay).
    for ear in ears {
        let ch = match ear.ear {
            Ear::Left => '-',
            Ear::Right => '=',
        };
        let polyline: Vec<(f64, f64)> = ear
            .samples
            .iter()
            .map(|s| (s.pressure, s.admittance))
            .collect();
        draw_curve(&mut grid, &polyline, p_min, p_max, y_min, y_max, ch);
    }

    for ear in ears {
        for point in &ear.control_points {
            let x = map_x(f64::from(point.pressure), p_min, p_max, width);
            let y = map_y(point.admittance, y_min, y_max, height);
            grid[y][x] = 'o';
        }
    }

    // Build final string. We include a small header with ranges.
    let mut out = String::new();
    out.push_str(&format!(
        "Plot: pressure=[{p_min:.0}, {p_max:.0}] daPa | admittance=[{y_min:.2}, {y_max:.2}] mmho\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn pressure_range(ears: &[EarCurve]) -> Option<(f64, f64)> {
    let mut min_p = f64::INFINITY;
    let mut max_p = f64::NEG_INFINITY;
    for ear in ears {
        for s in &ear.samples {
            min_p = min_p.min(s.pressure);
            max_p = max_p.max(s.pressure);
        }
    }
    if min_p.is_finite() && max_p.is_finite() && max_p > min_p {
        Some((min_p, max_p))
    } else {
        None
    }
}

fn admittance_range(ears: &[EarCurve]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for ear in ears {
        for s in &ear.samples {
            min_y = min_y.min(s.admittance);
            max_y = max_y.max(s.admittance);
        }
        for p in &ear.control_points {
            min_y = min_y.min(p.admittance);
            max_y = max_y.max(p.admittance);
        }
    }
    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(p: f64, p_min: f64, p_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((p - p_min) / (p_max - p_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    p_min: f64,
    p_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(p, y) in curve {
        let x = map_x(p, p_min, p_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::compute_ear_curve;
    use crate::domain::{
        ClinicalInputs, DrawConfig, EarSettings, KernelKind, SamplingPolicy, SweepRange,
    };

    fn one_ear() -> EarCurve {
        let config = DrawConfig {
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
            plot: true,
            plot_width: 40,
            plot_height: 10,
        };
        compute_ear_curve(Ear::Left, &config.left, &config).unwrap()
    }

    #[test]
    fn plot_has_header_and_grid_rows() {
        let ear = one_ear();
        let txt = render_ascii_plot(std::slice::from_ref(&ear), 40, 10);

        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].starts_with("Plot: pressure=[-200, 200] daPa"));
        for line in &lines[1..] {
            assert_eq!(line.chars().count(), 40);
        }
        assert!(txt.contains('o'));
        assert!(txt.contains('-'));
    }

    #[test]
    fn plot_is_deterministic() {
        let ear = one_ear();
        let a = render_ascii_plot(std::slice::from_ref(&ear), 60, 15);
        let b = render_ascii_plot(std::slice::from_ref(&ear), 60, 15);
        assert_eq!(a, b);
    }
}
