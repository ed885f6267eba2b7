//! Market-data retrieval for the dashboard.
//!
//! The data loader is a thin client over an external chart API. It is kept
//! behind the [`MarketDataProvider`] trait so the HTTP backend can be tested
//! against the deterministic [`FixtureProvider`] instead of the network.

pub mod error;
pub mod fixture;
pub mod yahoo;

pub use error::{ProviderError, Result};
pub use fixture::FixtureProvider;
pub use yahoo::YahooProvider;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use common::{DateRange, PriceSeries};

/// Source of daily OHLCV history for a single ticker.
#[async_trait]
pub trait MarketDataProvider: Send + Sync + std::fmt::Debug {
    /// Short identifier of the data source, surfaced by the health endpoint.
    fn name(&self) -> &str;

    /// Location the provider reads from, surfaced by the health endpoint.
    fn base_url(&self) -> &str;

    /// Fetches the daily series for `ticker` within the inclusive `range`.
    ///
    /// Implementations must fail fast on an invalid range rather than return
    /// a misleading empty series, and must return rows sorted by date within
    /// `[range.start, range.end]`.
    async fn fetch_daily(&self, ticker: &str, range: DateRange) -> Result<PriceSeries>;
}

/// Shared request validation for provider implementations.
pub(crate) fn validate_range(range: &DateRange) -> Result<()> {
    validate_range_at(range, Utc::now().date_naive())
}

pub(crate) fn validate_range_at(range: &DateRange, today: NaiveDate) -> Result<()> {
    range
        .validate(today)
        .map_err(ProviderError::InvalidRange)
}
