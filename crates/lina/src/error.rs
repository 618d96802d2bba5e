/// Invalid construction or transform input.
///
/// Construction errors are fatal to the value being built: callers never
/// receive a half-initialized point, polygon or matrix.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("polar radius must be non-zero")]
    ZeroRadius,
    #[error("{what} has a non-finite component")]
    NonFinite { what: &'static str },
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f64 },
    #[error("cannot rescale a zero-length vector")]
    ZeroLength,
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
    #[error("flat coordinate list has odd length {len}")]
    OddCoordinateCount { len: usize },
    #[error("matrix is singular (determinant {det:e})")]
    SingularMatrix { det: f64 },
}

/// Degenerate input detected while solving a swept collision.
///
/// The step driver treats any of these as "no collision for this pair"
/// and logs it; they never carry NaN into position state.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollisionError {
    #[error("no relative motion between the shapes")]
    NoRelativeMotion,
    #[error("circle centers coincide, contact normal is undefined")]
    CoincidentCenters,
    #[error("shapes overlap deeper than one step of motion (first contact at t={t:.4})")]
    DeepPenetration { t: f64 },
    #[error("invalid circle: {0}")]
    InvalidCircle(#[from] GeometryError),
}

impl CollisionError {
    /// Outcomes that occur every step for resting objects and are not worth a warning.
    pub fn is_steady_state(&self) -> bool {
        matches!(self, CollisionError::NoRelativeMotion)
    }
}
