//! Bridging between the transport-layer price types and the two-column
//! (ds, y) DataFrame the forecaster trains on.

use chrono::NaiveDate;
use polars::prelude::*;

use common::PriceSeries;

use crate::error::{ComputeError, Result};

/// Column name of the date axis.
pub const DS: &str = "ds";
/// Column name of the observed value.
pub const Y: &str = "y";

/// Relabels the closing prices of a series as a generic (ds, y) frame.
pub fn close_frame(series: &PriceSeries) -> Result<DataFrame> {
    let (dates, values): (Vec<NaiveDate>, Vec<f64>) = series.closes().into_iter().unzip();

    let df = DataFrame::new(vec![
        Series::new(DS.into(), dates).into(),
        Series::new(Y.into(), values).into(),
    ])?;
    Ok(df)
}

/// Reads a (ds, y) frame back into (date, value) rows, sorted as stored.
pub fn frame_rows(df: &DataFrame) -> Result<Vec<(NaiveDate, f64)>> {
    let ds = df.column(DS)?;
    let y = df.column(Y)?;

    let mut rows = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let days = ds
            .get(i)?
            .try_extract::<i32>()
            .map_err(|e| ComputeError::Date(format!("row {i}: {e}")))?;
        let value = y
            .get(i)?
            .try_extract::<f64>()
            .map_err(|e| ComputeError::Series(format!("row {i}: {e}")))?;
        rows.push((date_from_epoch_days(days)?, value));
    }
    Ok(rows)
}

/// Date columns materialize as days since 1970-01-01.
fn date_from_epoch_days(days: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .checked_add_signed(chrono::Duration::days(days as i64))
        .ok_or_else(|| ComputeError::Date(format!("epoch day {days} out of range")))
}
