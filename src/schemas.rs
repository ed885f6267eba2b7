use axum::http::StatusCode;
use axum::response::Json;
use chrono::{NaiveDate, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use common::{
    ComponentPoint, DateRange, ForecastBundle, ForecastComponents, ForecastPoint,
    ForecastTimeseries, PricePoint, PriceSeries, SeasonalTerm, TickerInfo,
};
use provider::MarketDataProvider;

/// Default start of the historical window, matching the dashboard's
/// date-picker default.
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap()
}

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Market-data source
    pub provider: Arc<dyn MarketDataProvider>,
    /// Memoized load and forecast results keyed by request parameters
    pub cache: Cache<String, CachedData>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    Prices(PriceSeries),
    Forecast(ForecastBundle),
}

/// Query parameters for the prices endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PricesQuery {
    /// Start date (YYYY-MM-DD); defaults to 2015-01-01
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); defaults to today
    pub end_date: Option<NaiveDate>,
}

impl PricesQuery {
    pub fn range(&self) -> DateRange {
        resolve_range(self.start_date, self.end_date)
    }
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ForecastQuery {
    /// Start date (YYYY-MM-DD); defaults to 2015-01-01
    pub start_date: Option<NaiveDate>,
    /// End date (YYYY-MM-DD); defaults to today
    pub end_date: Option<NaiveDate>,
    /// Forecast horizon in years (1-8); defaults to 1
    pub years: Option<u32>,
}

impl ForecastQuery {
    pub fn range(&self) -> DateRange {
        resolve_range(self.start_date, self.end_date)
    }

    pub fn years(&self) -> u32 {
        self.years.unwrap_or(1)
    }
}

/// Query parameters for the dashboard page
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardQuery {
    /// Ticker symbol; defaults to the first selector entry
    pub ticker: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub years: Option<u32>,
}

impl DashboardQuery {
    pub fn range(&self) -> DateRange {
        resolve_range(self.start_date, self.end_date)
    }

    pub fn years(&self) -> u32 {
        self.years.unwrap_or(1)
    }
}

fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> DateRange {
    DateRange::new(
        start.unwrap_or_else(default_start),
        end.unwrap_or_else(|| Utc::now().date_naive()),
    )
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Builds the error reply handlers return on failure.
pub fn error_response(
    status: StatusCode,
    code: &str,
    error: impl Into<String>,
) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Configured market-data source
    pub provider: String,
    /// Location the market-data source reads from
    pub provider_url: String,
    /// Entries currently memoized
    pub cache_entries: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::tickers::get_tickers,
        crate::handlers::prices::get_prices,
        crate::handlers::forecast::get_forecast,
    ),
    components(
        schemas(
            ApiResponse<PriceSeries>,
            ApiResponse<ForecastBundle>,
            ApiResponse<Vec<TickerInfo>>,
            ErrorResponse,
            HealthResponse,
            PricesQuery,
            ForecastQuery,
            TickerInfo,
            DateRange,
            PricePoint,
            PriceSeries,
            ForecastPoint,
            ForecastTimeseries,
            ForecastComponents,
            ComponentPoint,
            SeasonalTerm,
            ForecastBundle,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tickers", description = "Ticker selector endpoints"),
        (name = "prices", description = "Historical price endpoints"),
        (name = "forecast", description = "Forecast endpoints"),
    ),
    info(
        title = "Stockcast API",
        description = "Stock Forecast Dashboard - historical prices and additive time-series forecasts",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
