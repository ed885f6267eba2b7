//! Common transport-layer types shared between the backend handlers, the
//! market-data provider and the forecaster.
//! These structs mirror the request/response payloads of the HTTP API so the
//! workspace crates can exchange data without duplicating shapes.

mod forecast;
mod prices;
mod tickers;

pub use forecast::{
    ComponentPoint, ForecastBundle, ForecastComponents, ForecastPoint, ForecastTimeseries,
    SeasonalTerm,
};
pub use prices::{DateRange, PricePoint, PriceSeries};
pub use tickers::{is_supported, supported_tickers, TickerInfo};
