use thiserror::Error;
use tracing::error;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from Polars DataFrame operations
    #[error("DataFrame error: {0}")]
    DataFrame(String),

    /// Error from Polars Series operations
    #[error("Series error: {0}")]
    Series(String),

    /// The input series carried no observations
    #[error("empty input series")]
    EmptySeries,

    /// The input series is too short to fit a model
    #[error("input series too short: {0} observations, need at least 2")]
    TooShort(usize),

    /// The requested forecast horizon is unusable
    #[error("invalid horizon: {0}")]
    InvalidHorizon(String),

    /// Error from date operations
    #[error("date error: {0}")]
    Date(String),
}

impl From<polars::error::PolarsError> for ComputeError {
    fn from(error: polars::error::PolarsError) -> Self {
        let compute_error = match error {
            polars::error::PolarsError::NoData(_)
            | polars::error::PolarsError::ShapeMismatch(_)
            | polars::error::PolarsError::SchemaMismatch(_)
            | polars::error::PolarsError::ComputeError(_)
            | polars::error::PolarsError::OutOfBounds(_) => {
                ComputeError::DataFrame(error.to_string())
            }
            _ => ComputeError::Series(error.to_string()),
        };
        error!(?compute_error, "polars operation failed");
        compute_error
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
