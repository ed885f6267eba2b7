//! Forecasting over historical price series.
//!
//! The backend hands a [`common::PriceSeries`] to [`forecast_series`], which
//! relabels the closing prices as a (ds, y) frame, fits the additive model
//! and extends it by the requested horizon.

pub mod error;
pub mod frame;
pub mod model;

pub use error::{ComputeError, Result};
pub use model::{AdditiveForecaster, FittedModel};

use common::{ForecastBundle, PriceSeries};
use tracing::instrument;

/// Days covered by a forecast horizon of `years` years; the dashboard slider
/// counts years, the model counts days.
pub fn horizon_days(years: u32) -> u32 {
    years * 365
}

/// Fits the additive model on the closing prices of `series` and predicts
/// `horizon_days` past the last observation.
#[instrument(skip(series), fields(ticker = %series.ticker, rows = series.len()))]
pub fn forecast_series(series: &PriceSeries, horizon_days: u32) -> Result<ForecastBundle> {
    let df = frame::close_frame(series)?;
    let model = AdditiveForecaster::new().fit(&df)?;
    let (forecast, components) = model.predict(horizon_days)?;

    Ok(ForecastBundle {
        ticker: series.ticker.clone(),
        horizon_days,
        forecast,
        components,
    })
}
