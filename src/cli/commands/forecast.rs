use anyhow::{bail, Result};
use chrono::{NaiveDate, Utc};
use tracing::info;

use common::DateRange;
use provider::{MarketDataProvider, YahooProvider};

/// Fetches a daily series, forecasts it and prints the bundle as pretty JSON.
pub async fn forecast(
    ticker: &str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    years: u32,
    provider_url: &str,
) -> Result<()> {
    if !(1..=8).contains(&years) {
        bail!("forecast horizon must be between 1 and 8 years, got {years}");
    }

    let ticker = ticker.to_uppercase();
    let end_date = end_date.unwrap_or_else(|| Utc::now().date_naive());
    let range = DateRange::new(start_date, end_date);

    info!("Fetching {} from {} to {}", ticker, range.start, range.end);
    let provider = YahooProvider::new(provider_url)?;
    let series = provider.fetch_daily(&ticker, range).await?;

    let horizon = compute::horizon_days(years);
    info!("Forecasting {} rows {} days ahead", series.len(), horizon);
    let bundle = compute::forecast_series(&series, horizon)?;

    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
