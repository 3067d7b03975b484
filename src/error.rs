//! Error type shared by the CWT and smoothing modules

/// Errors raised by the transform and smoothing routines.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid argument: {name} = {value}")]
    InvalidArgument { name: String, value: String },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("No transform has been performed yet")]
    NotReady,

    #[error("Point ({x}, {y}) is outside a {rows}x{cols} field")]
    OutOfRange {
        x: usize,
        y: usize,
        rows: usize,
        cols: usize,
    },
}

impl Error {
    pub(crate) fn invalid(name: &str, value: impl ToString) -> Self {
        Error::InvalidArgument {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
