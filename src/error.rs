//! Profile error types

use thiserror::Error;

/// Result type for envelope and profile operations
pub type Result<T> = std::result::Result<T, ProfileError>;

/// Errors that can occur while extracting envelopes or computing profiles
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ProfileError {
    /// A signal or selected sub-range has no samples
    #[error("empty input: {context}")]
    EmptyInput { context: &'static str },

    /// Not enough envelope points for quadratic interpolation
    #[error("insufficient support points: found {found}, need at least {required}")]
    InsufficientSupportPoints { found: usize, required: usize },

    /// Frequency axis and curve lengths differ
    #[error("shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Axis is not strictly ascending
    #[error("axis is not strictly ascending at index {index}")]
    NonMonotonicAxis { index: usize },

    /// Window or frame size is unusable
    #[error("invalid window size: {0}")]
    InvalidWindow(usize),

    /// Spline collocation matrix has a zero pivot
    #[error("singular interpolation system at row {row}")]
    SingularSystem { row: usize },

    /// Configuration values are out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration JSON could not be parsed
    #[error("configuration parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProfileError {
    /// True for errors caused by the shape or content of the input data,
    /// as opposed to configuration problems.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProfileError::EmptyInput { .. }
                | ProfileError::InsufficientSupportPoints { .. }
                | ProfileError::ShapeMismatch { .. }
                | ProfileError::NonMonotonicAxis { .. }
        )
    }
}
