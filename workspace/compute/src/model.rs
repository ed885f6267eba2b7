//! Additive trend + seasonality forecaster.
//!
//! The model mirrors the shape of a generic additive forecasting library:
//! a linear trend fitted over the time index, a weekly cycle estimated per
//! weekday and a yearly cycle estimated per calendar month, with an
//! uncertainty interval that widens past the last observation. Fitting is
//! fully deterministic.

use chrono::{Datelike, NaiveDate};
use polars::prelude::DataFrame;
use tracing::{debug, instrument};

use common::{ComponentPoint, ForecastComponents, ForecastPoint, ForecastTimeseries, SeasonalTerm};

use crate::error::{ComputeError, Result};
use crate::frame::frame_rows;

/// z-score of the 80% prediction interval, the library default the original
/// dashboard relied on.
const INTERVAL_Z: f64 = 1.2816;

const WEEKDAY_LABELS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_LABELS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Configuration of the additive model. No knobs are exposed beyond the
/// interval width; the dashboard only ever plumbs the horizon through.
#[derive(Debug, Clone)]
pub struct AdditiveForecaster {
    interval_z: f64,
}

impl Default for AdditiveForecaster {
    fn default() -> Self {
        Self {
            interval_z: INTERVAL_Z,
        }
    }
}

impl AdditiveForecaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits the model on a (ds, y) frame.
    #[instrument(skip(self, df))]
    pub fn fit(&self, df: &DataFrame) -> Result<FittedModel> {
        let rows = frame_rows(df)?;
        if rows.is_empty() {
            return Err(ComputeError::EmptySeries);
        }
        if rows.len() < 2 {
            return Err(ComputeError::TooShort(rows.len()));
        }

        let first_date = rows[0].0;
        let n = rows.len();

        // Time index in days since the first observation; gaps between
        // trading days are preserved.
        let ts: Vec<f64> = rows
            .iter()
            .map(|(date, _)| (*date - first_date).num_days() as f64)
            .collect();
        let ys: Vec<f64> = rows.iter().map(|(_, y)| *y).collect();

        let (intercept, slope) = ols_line(&ts, &ys);

        // Weekly cycle from the detrended residuals.
        let detrended: Vec<f64> = ts
            .iter()
            .zip(&ys)
            .map(|(t, y)| y - (intercept + slope * t))
            .collect();
        let weekly = bucket_means::<7>(
            rows.iter()
                .map(|(date, _)| date.weekday().num_days_from_monday() as usize),
            &detrended,
        );

        // Yearly cycle from what the trend and weekly cycle leave over.
        let deseasoned: Vec<f64> = rows
            .iter()
            .zip(&detrended)
            .map(|((date, _), r)| r - weekly[date.weekday().num_days_from_monday() as usize])
            .collect();
        let yearly = bucket_means::<12>(
            rows.iter().map(|(date, _)| date.month0() as usize),
            &deseasoned,
        );

        let sigma = {
            let sum_sq: f64 = rows
                .iter()
                .zip(&deseasoned)
                .map(|((date, _), r)| {
                    let e = r - yearly[date.month0() as usize];
                    e * e
                })
                .sum();
            (sum_sq / (n - 1) as f64).sqrt()
        };

        debug!(n, slope, sigma, "additive model fitted");

        Ok(FittedModel {
            history_dates: rows.into_iter().map(|(date, _)| date).collect(),
            first_date,
            intercept,
            slope,
            weekly,
            yearly,
            sigma,
            interval_z: self.interval_z,
        })
    }
}

/// A fitted additive model, ready to extend the series into the future.
#[derive(Debug, Clone)]
pub struct FittedModel {
    history_dates: Vec<NaiveDate>,
    first_date: NaiveDate,
    intercept: f64,
    slope: f64,
    weekly: [f64; 7],
    yearly: [f64; 12],
    sigma: f64,
    interval_z: f64,
}

impl FittedModel {
    pub fn last_observed(&self) -> NaiveDate {
        *self
            .history_dates
            .last()
            .unwrap_or(&self.first_date)
    }

    /// Predicts every historical date plus `horizon_days` daily steps beyond
    /// the last observation.
    #[instrument(skip(self))]
    pub fn predict(&self, horizon_days: u32) -> Result<(ForecastTimeseries, ForecastComponents)> {
        if horizon_days == 0 {
            return Err(ComputeError::InvalidHorizon(
                "horizon must be at least one day".to_string(),
            ));
        }

        let last = self.last_observed();
        let n = self.history_dates.len() as f64;

        let mut dates = self.history_dates.clone();
        for k in 1..=i64::from(horizon_days) {
            let date = last
                .checked_add_signed(chrono::Duration::days(k))
                .ok_or_else(|| {
                    ComputeError::Date(format!("horizon overflows the calendar at step {k}"))
                })?;
            dates.push(date);
        }

        let mut points = Vec::with_capacity(dates.len());
        let mut trend_points = Vec::with_capacity(dates.len());
        for date in dates {
            let t = (date - self.first_date).num_days() as f64;
            let trend = self.intercept + self.slope * t;
            let yhat = trend
                + self.weekly[date.weekday().num_days_from_monday() as usize]
                + self.yearly[date.month0() as usize];

            // Interval widens with distance past the last observation.
            let steps_ahead = (date - last).num_days().max(0) as f64;
            let width = self.interval_z * self.sigma * (1.0 + steps_ahead / n).sqrt();

            points.push(ForecastPoint::new(date, yhat, yhat - width, yhat + width));
            trend_points.push(ComponentPoint { date, value: trend });
        }

        let components = ForecastComponents {
            trend: trend_points,
            weekly: WEEKDAY_LABELS
                .iter()
                .zip(self.weekly)
                .map(|(label, value)| SeasonalTerm {
                    label: (*label).to_string(),
                    value,
                })
                .collect(),
            yearly: MONTH_LABELS
                .iter()
                .zip(self.yearly)
                .map(|(label, value)| SeasonalTerm {
                    label: (*label).to_string(),
                    value,
                })
                .collect(),
        };

        Ok((ForecastTimeseries::new(points), components))
    }
}

/// Ordinary least squares line over (t, y), returning (intercept, slope).
fn ols_line(ts: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = ts.len() as f64;
    let mean_t = ts.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var = 0.0;
    for (t, y) in ts.iter().zip(ys) {
        cov += (t - mean_t) * (y - mean_y);
        var += (t - mean_t) * (t - mean_t);
    }

    if var == 0.0 {
        return (mean_y, 0.0);
    }
    let slope = cov / var;
    (mean_y - slope * mean_t, slope)
}

/// Mean residual per bucket; empty buckets contribute nothing.
fn bucket_means<const N: usize>(
    buckets: impl Iterator<Item = usize>,
    values: &[f64],
) -> [f64; N] {
    let mut sums = [0.0; N];
    let mut counts = [0usize; N];
    for (bucket, value) in buckets.zip(values) {
        sums[bucket] += value;
        counts[bucket] += 1;
    }

    let mut means = [0.0; N];
    for i in 0..N {
        if counts[i] > 0 {
            means[i] = sums[i] / counts[i] as f64;
        }
    }
    means
}
