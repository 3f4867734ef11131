use thiserror::Error;

/// Errors surfaced by the drawing surface to its host
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The brush color specification is neither a known name nor a hex color
    #[error("Invalid color format: {0:?}")]
    InvalidColorFormat(String),
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
