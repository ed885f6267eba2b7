use thiserror::Error;

/// Error types for market-data retrieval.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error from the HTTP transport
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested date range is invalid and was rejected before any fetch
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// The upstream API does not know the requested symbol
    #[error("unknown ticker {ticker}: {reason}")]
    UnknownTicker { ticker: String, reason: String },

    /// The upstream API answered but produced no usable rows
    #[error("no data for {ticker}: {reason}")]
    EmptySeries { ticker: String, reason: String },

    /// The upstream payload did not match the expected chart schema
    #[error("malformed upstream payload: {0}")]
    Payload(String),
}

/// Type alias for Result with ProviderError
pub type Result<T> = std::result::Result<T, ProviderError>;
