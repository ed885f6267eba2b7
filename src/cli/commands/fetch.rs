use anyhow::Result;
use chrono::{NaiveDate, Utc};
use tracing::info;

use common::DateRange;
use provider::{MarketDataProvider, YahooProvider};

/// Fetches a daily series and prints it to stdout as pretty JSON.
pub async fn fetch(
    ticker: &str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    provider_url: &str,
) -> Result<()> {
    let ticker = ticker.to_uppercase();
    let end_date = end_date.unwrap_or_else(|| Utc::now().date_naive());
    let range = DateRange::new(start_date, end_date);

    info!("Fetching {} from {} to {}", ticker, range.start, range.end);
    let provider = YahooProvider::new(provider_url)?;
    let series = provider.fetch_daily(&ticker, range).await?;

    info!("Fetched {} rows", series.len());
    println!("{}", serde_json::to_string_pretty(&series)?);
    Ok(())
}
