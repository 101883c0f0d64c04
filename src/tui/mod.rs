//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for adjusting the clinical landmark
//! values, epsilon, the sweep bound, and the kernel, then renders the fitted
//! curve(s) live. Core errors (degenerate geometry, failed fits) show up in
//! the status line and leave the last good curve on screen.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::DrawOutput;
use crate::domain::{DrawConfig, Ear, EarCurve, EarSettings, KernelKind};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::TympPlottersChart;

/// Number of selectable settings fields.
const FIELD_COUNT: usize = 8;

/// Start the TUI with the given initial configuration.
pub fn run(config: DrawConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    config: DrawConfig,
    /// Launch-time configuration, restored by the reset key.
    initial: DrawConfig,
    /// Which ear the settings fields edit.
    active_ear: Ear,
    selected_field: usize,
    status: String,
    run: Option<DrawOutput>,
}

impl App {
    fn new(config: DrawConfig) -> Self {
        let mut app = Self {
            initial: config.clone(),
            config,
            active_ear: Ear::Left,
            selected_field: 0,
            status: String::new(),
            run: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char('b') => {
                if self.config.right.is_some() {
                    self.config.right = None;
                    self.active_ear = Ear::Left;
                    self.status = "Single-ear mode.".to_string();
                } else {
                    self.config.right = Some(self.config.left);
                    self.active_ear = Ear::Right;
                    self.status = "Dual-ear mode (right ear mirrors left).".to_string();
                }
                self.recompute();
            }
            KeyCode::Char('r') => {
                self.config = self.initial.clone();
                self.active_ear = Ear::Left;
                self.status = "Reset to launch settings.".to_string();
                self.recompute();
            }
            _ => {}
        }

        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let step = f64::from(delta);
        match self.selected_field {
            0 => {
                self.active_ear = match self.active_ear {
                    Ear::Left => Ear::Right,
                    Ear::Right => Ear::Left,
                };
                if self.active_ear == Ear::Right && self.config.right.is_none() {
                    self.config.right = Some(self.config.left);
                }
                self.status = format!("editing {} ear", self.active_ear.display_name());
            }
            1 => {
                let settings = self.active_settings_mut();
                settings.inputs.ytm = (settings.inputs.ytm + 0.05 * step).clamp(0.0, 4.0);
            }
            2 => {
                let settings = self.active_settings_mut();
                settings.inputs.tpp = (settings.inputs.tpp + 5 * delta).clamp(-398, 198);
            }
            3 => {
                let settings = self.active_settings_mut();
                settings.inputs.tw = (settings.inputs.tw + 5 * delta).clamp(2, 399);
            }
            4 => {
                let settings = self.active_settings_mut();
                settings.inputs.vea = (settings.inputs.vea + 0.05 * step).clamp(0.0, 4.0);
            }
            5 => {
                let settings = self.active_settings_mut();
                settings.epsilon = (settings.epsilon + step).clamp(1.0, 75.0);
            }
            6 => {
                self.config.sweep.min_pressure =
                    (self.config.sweep.min_pressure + 10 * delta).clamp(-400, -200);
            }
            7 => {
                self.config.kernel = next_kernel(self.config.kernel);
                self.status = format!("kernel: {}", self.config.kernel.display_name());
            }
            _ => {}
        }
        self.recompute();
    }

    fn active_settings(&self) -> &EarSettings {
        match self.active_ear {
            Ear::Left => &self.config.left,
            Ear::Right => self.config.right.as_ref().unwrap_or(&self.config.left),
        }
    }

    fn active_settings_mut(&mut self) -> &mut EarSettings {
        match self.active_ear {
            Ear::Left => &mut self.config.left,
            Ear::Right => self.config.right.get_or_insert(self.config.left),
        }
    }

    /// Recompute the curves from the current settings.
    ///
    /// On failure the previous run stays on screen and the error message goes
    /// to the status line — an impossible geometry should read as feedback,
    /// not as a crash.
    fn recompute(&mut self) {
        match crate::app::pipeline::run_draw(&self.config) {
            Ok(run) => {
                self.run = Some(run);
                if self.status.is_empty() {
                    self.status = "Ready.".to_string();
                }
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("tymp", Style::default().fg(Color::Cyan)),
            Span::raw(" — tympanogram curves"),
        ]));

        lines.push(Line::from(Span::styled(
            format!(
                "sweep: [{}, {}] daPa | kernel: {} | editing: {} ear",
                self.config.sweep.min_pressure,
                self.config.sweep.max_pressure,
                self.config.kernel.display_name(),
                self.active_ear.display_name(),
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            let peaks: Vec<String> = run
                .ears
                .iter()
                .map(|ear| {
                    format!(
                        "{}: Ytm {} mmho @ {} daPa",
                        ear.ear.display_name(),
                        ear.inputs.ytm,
                        ear.inputs.tpp
                    )
                })
                .collect();
            lines.push(Line::from(Span::styled(
                peaks.join(" | "),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Tympanogram").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for first draw...")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = ChartSeries::from_run(run);

        let (chart_rect, insets) = chart_layout(inner);
        let widget = TympPlottersChart {
            left: &series.left,
            right: &series.right,
            left_markers: &series.left_markers,
            right_markers: &series.right_markers,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "pressure (daPa)",
            y_label: "admittance (mmho)",
            fmt_x: fmt_axis_pressure,
            fmt_y: fmt_axis_admittance,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, series.x_bounds, series.y_bounds);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings = self.active_settings();

        let items = vec![
            ListItem::new(format!("Ear: {}", self.active_ear.display_name())),
            ListItem::new(format!("Ytm: {:.2} mmho", settings.inputs.ytm)),
            ListItem::new(format!("TPP: {} daPa", settings.inputs.tpp)),
            ListItem::new(format!("TW: {} daPa", settings.inputs.tw)),
            ListItem::new(format!("Vea: {:.2} mmho", settings.inputs.vea)),
            ListItem::new(format!("Epsilon: {:.0}", settings.epsilon)),
            ListItem::new(format!("NPa: {} daPa", self.config.sweep.min_pressure)),
            ListItem::new(format!("Kernel: {}", self.config.kernel.display_name())),
        ];

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  b dual ear  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Chart series and bounds for Plotters.
struct ChartSeries {
    left: Vec<(f64, f64)>,
    right: Vec<(f64, f64)>,
    left_markers: Vec<(f64, f64)>,
    right_markers: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

impl ChartSeries {
    fn from_run(run: &DrawOutput) -> Self {
        let mut series = Self {
            left: Vec::new(),
            right: Vec::new(),
            left_markers: Vec::new(),
            right_markers: Vec::new(),
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
        };

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;

        for ear in &run.ears {
            let (curve, markers) = match ear.ear {
                Ear::Left => (&mut series.left, &mut series.left_markers),
                Ear::Right => (&mut series.right, &mut series.right_markers),
            };
            fill_ear_series(ear, curve, markers);

            for &(x, y) in curve.iter().chain(markers.iter()) {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }

        if !x_min.is_finite() || !x_max.is_finite() || x_max <= x_min {
            x_min = -200.0;
            x_max = 200.0;
        }
        if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
            y_min = 0.0;
            y_max = 1.0;
        }

        let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
        series.x_bounds = [x_min, x_max];
        series.y_bounds = [y_min - pad, y_max + pad];
        series
    }
}

fn fill_ear_series(ear: &EarCurve, curve: &mut Vec<(f64, f64)>, markers: &mut Vec<(f64, f64)>) {
    curve.extend(ear.samples.iter().map(|s| (s.pressure, s.admittance)));
    markers.extend(
        ear.control_points
            .iter()
            .map(|p| (f64::from(p.pressure), p.admittance)),
    );
}

fn next_kernel(cur: KernelKind) -> KernelKind {
    match cur {
        KernelKind::Multiquadric => KernelKind::Gaussian,
        KernelKind::Gaussian => KernelKind::ThinPlate,
        KernelKind::ThinPlate => KernelKind::Multiquadric,
    }
}

fn fmt_axis_pressure(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_admittance(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let x_val = x_bounds[0] + u * (x_bounds[1] - x_bounds[0]);
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label = fmt_axis_pressure(x_val);
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let y_val = y_bounds[0] + u * (y_bounds[1] - y_bounds[0]);
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label = fmt_axis_admittance(y_val);
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new("pressure (daPa)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("mmho")
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
