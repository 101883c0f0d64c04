use crate::domain::PointRole;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failures of the curve computation itself.
///
/// These are kept distinct from [`AppError`] so callers (CLI, TUI) can tell
/// bad inputs apart from degenerate geometry and from numeric solve failures,
/// and surface an appropriate message instead of crashing.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveError {
    /// An input failed the defensive re-validation at the core boundary
    /// (e.g. `tw <= 0`, peak pressure outside the sweep range).
    InvalidInput(String),
    /// Two of the five control points collided or ended up out of order
    /// after boundary clamping. Identifies both offending points.
    DegenerateControlPoints {
        first: PointRole,
        first_pressure: i32,
        second: PointRole,
        second_pressure: i32,
    },
    /// The interpolation system could not be solved, or solving it did not
    /// actually reproduce the control points (singular / ill-conditioned
    /// matrix), or evaluation produced a non-finite sample.
    FitFailed(String),
}

impl std::fmt::Display for CurveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurveError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            CurveError::DegenerateControlPoints {
                first,
                first_pressure,
                second,
                second_pressure,
            } => write!(
                f,
                "Degenerate control points: {} ({first_pressure} daPa) and {} ({second_pressure} daPa) \
                 are not in strictly increasing pressure order.",
                first.display_name(),
                second.display_name(),
            ),
            CurveError::FitFailed(msg) => write!(f, "Curve fit failed: {msg}"),
        }
    }
}

impl std::error::Error for CurveError {}

impl From<CurveError> for AppError {
    fn from(err: CurveError) -> Self {
        let exit_code = match &err {
            CurveError::InvalidInput(_) => 2,
            CurveError::DegenerateControlPoints { .. } => 3,
            CurveError::FitFailed(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}
