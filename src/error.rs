//! Error types for the grid world crate

use thiserror::Error;

use crate::grid::Cell;

/// Main error type for the grid world crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("start cell {cell} is outside the grid or on the obstacle")]
    InvalidStart { cell: Cell },

    #[error("{name} {value} must be finite and within [0, 1]")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("stochastic transition dynamics are not supported")]
    UnsupportedDynamics,

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
