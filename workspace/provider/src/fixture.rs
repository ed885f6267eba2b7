//! Deterministic in-memory provider used by tests and offline demos.

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::instrument;

use common::{DateRange, PricePoint, PriceSeries};

use crate::error::{ProviderError, Result};
use crate::{validate_range_at, MarketDataProvider};

/// Synthesizes a plausible daily series instead of calling the network.
///
/// The same (ticker, range) request always yields the same rows: a linear
/// drift plus weekly and yearly cycles, sampled on weekdays only so the
/// series has trading-day gaps like real data.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    /// "today" used for range validation, fixed so tests are stable
    today: NaiveDate,
}

impl FixtureProvider {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    fn synth_point(ticker: &str, date: NaiveDate) -> PricePoint {
        // Stable per-ticker base price derived from the symbol bytes.
        let base = 40.0 + (ticker.bytes().map(u64::from).sum::<u64>() % 200) as f64;

        let t = (date - NaiveDate::from_ymd_opt(2010, 1, 1).unwrap()).num_days() as f64;
        let weekly = (t * std::f64::consts::TAU / 7.0).sin() * 0.8;
        let yearly = (t * std::f64::consts::TAU / 365.0).sin() * 4.0;
        let close = base + t * 0.01 + weekly + yearly;

        PricePoint::new(
            date,
            close - 0.4,
            close + 0.7,
            close - 0.9,
            close,
            1_000_000 + (t as u64 % 7) * 25_000,
        )
    }
}

impl Default for FixtureProvider {
    fn default() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for FixtureProvider {
    fn name(&self) -> &str {
        "fixture"
    }

    fn base_url(&self) -> &str {
        "memory://fixture"
    }

    #[instrument(skip(self))]
    async fn fetch_daily(&self, ticker: &str, range: DateRange) -> Result<PriceSeries> {
        validate_range_at(&range, self.today)?;

        let mut points = Vec::new();
        let mut date = range.start;
        while date <= range.end {
            if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                points.push(Self::synth_point(ticker, date));
            }
            date = date.succ_opt().ok_or_else(|| {
                ProviderError::InvalidRange(format!("date overflow past {date}"))
            })?;
        }

        if points.is_empty() {
            return Err(ProviderError::EmptySeries {
                ticker: ticker.to_string(),
                reason: "range contains no trading days".to_string(),
            });
        }

        Ok(PriceSeries::new(ticker, points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn provider() -> FixtureProvider {
        FixtureProvider::new(d(2024, 6, 1))
    }

    #[tokio::test]
    async fn series_stays_within_range_and_skips_weekends() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        let series = provider().fetch_daily("AAPL", range).await.unwrap();

        assert!(!series.is_empty());
        for point in &series.points {
            assert!(range.contains(point.date));
            assert!(!matches!(
                point.date.weekday(),
                Weekday::Sat | Weekday::Sun
            ));
        }
        // January 2024 has 23 weekdays.
        assert_eq!(series.len(), 23);
    }

    #[tokio::test]
    async fn repeated_fetches_are_identical() {
        let range = DateRange::new(d(2023, 1, 1), d(2023, 12, 31));
        let a = provider().fetch_daily("GOOG", range).await.unwrap();
        let b = provider().fetch_daily("GOOG", range).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn different_tickers_yield_different_prices() {
        let range = DateRange::new(d(2024, 1, 2), d(2024, 1, 2));
        let a = provider().fetch_daily("AAPL", range).await.unwrap();
        let g = provider().fetch_daily("GME", range).await.unwrap();
        assert_ne!(a.points[0].close, g.points[0].close);
    }

    #[tokio::test]
    async fn inverted_range_fails_fast() {
        let range = DateRange::new(d(2024, 2, 1), d(2024, 1, 1));
        let err = provider().fetch_daily("AAPL", range).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidRange(_)));
    }

    #[tokio::test]
    async fn weekend_only_range_is_an_empty_series_error() {
        // 2024-01-06/07 is a Saturday/Sunday pair.
        let range = DateRange::new(d(2024, 1, 6), d(2024, 1, 7));
        let err = provider().fetch_daily("AAPL", range).await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptySeries { .. }));
    }
}
