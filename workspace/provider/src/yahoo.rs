//! Client for the Yahoo-style `v8/finance/chart` endpoint.

use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use common::{DateRange, PricePoint, PriceSeries};

use crate::error::{ProviderError, Result};
use crate::{validate_range, MarketDataProvider};

const USER_AGENT: &str = concat!("stockcast/", env!("CARGO_PKG_VERSION"));

/// Market-data provider backed by the public chart API.
#[derive(Debug, Clone)]
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Creates a provider against a custom base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn chart_url(&self, ticker: &str, range: &DateRange) -> String {
        // period2 is exclusive upstream, so request one day past the end and
        // filter back to the inclusive range afterwards.
        let period1 = range.start.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
        let period2 = (range.end + chrono::Duration::days(1))
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp();
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, ticker, period1, period2
        )
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self))]
    async fn fetch_daily(&self, ticker: &str, range: DateRange) -> Result<PriceSeries> {
        validate_range(&range)?;

        let url = self.chart_url(ticker, &range);
        debug!(%url, "fetching daily chart");

        let envelope: ChartEnvelope = self.client.get(&url).send().await?.json().await?;

        if let Some(err) = envelope.chart.error {
            return Err(ProviderError::UnknownTicker {
                ticker: ticker.to_string(),
                reason: err.description,
            });
        }

        let result = envelope
            .chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| ProviderError::EmptySeries {
                ticker: ticker.to_string(),
                reason: "chart response carried no result".to_string(),
            })?;

        let points = extract_points(&result, &range)?;
        if points.is_empty() {
            return Err(ProviderError::EmptySeries {
                ticker: ticker.to_string(),
                reason: "no usable rows in the requested range".to_string(),
            });
        }

        debug!(rows = points.len(), "chart fetch complete");
        Ok(PriceSeries::new(ticker, points))
    }
}

/// Turns one chart result into OHLCV rows, dropping rows with missing quotes
/// and rows outside the inclusive range.
fn extract_points(result: &ChartResult, range: &DateRange) -> Result<Vec<PricePoint>> {
    let timestamps = result.timestamp.as_deref().unwrap_or(&[]);
    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| ProviderError::Payload("chart result without quote block".to_string()))?;

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            warn!(ts, "skipping row with out-of-range timestamp");
            continue;
        };
        if !range.contains(date) {
            continue;
        }

        let row = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        );
        match row {
            (Some(open), Some(high), Some(low), Some(close), Some(volume)) => {
                points.push(PricePoint::new(date, open, high, low, close, volume));
            }
            _ => {
                warn!(%date, "skipping row with missing quote values");
            }
        }
    }

    Ok(points)
}

// Wire schema of the chart endpoint.

#[derive(Deserialize, Debug)]
struct ChartEnvelope {
    chart: ChartResponse,
}

#[derive(Deserialize, Debug)]
struct ChartResponse {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    #[allow(dead_code)]
    code: String,
    description: String,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}
