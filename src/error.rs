use thiserror::Error;

/// Top-level error type for the generalised-cylinder engine.
#[derive(Debug, Error)]
pub enum GencylError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Library(#[from] LibraryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error(transparent)]
    Turtle(#[from] TurtleError),
}

/// Errors raised while constructing geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("at least {required} control points are required, got {actual}")]
    TooFewControlPoints { required: usize, actual: usize },

    #[error("{what}: expected {expected} entries, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("index {index} is out of range for {len} control points")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the cross-section shape library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("cross-section shape not found in library")]
    ShapeNotFound,
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Errors related to turtle recording.
#[derive(Debug, Error)]
pub enum TurtleError {
    #[error("pop_state called with an empty state stack")]
    StateStackUnderflow,

    #[error("no cylinder is open; call begin_cylinder first")]
    NoOpenCylinder,
}

/// Convenience type alias for results using [`GencylError`].
pub type Result<T> = std::result::Result<T, GencylError>;
