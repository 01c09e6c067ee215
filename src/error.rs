use thiserror::Error;

/// Errors reported for invalid configuration or unreadable input.
///
/// Geometric edge cases (degenerate segments, curves that fail to converge)
/// are not errors: they produce a well defined result instead.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FlattenError {
    #[error("max error must be a positive number, got {0}")]
    InvalidTolerance(f64),

    #[error("max distance between points must be zero or a positive number, got {0}")]
    InvalidMaxDistance(f64),

    #[error("spacing must be a positive number, got {0}")]
    InvalidSpacing(f64),

    #[error("subdivision limits must be at least 1")]
    InvalidDepth,

    #[error("failed to parse svg: {0}")]
    Svg(#[from] usvg::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FlattenError>;
