use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

/// A single daily OHLCV row for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PricePoint {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Daily high
    pub high: f64,
    /// Daily low
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Traded volume
    pub volume: u64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Ordered daily price history for one ticker over a date range.
///
/// Points are kept sorted by date with duplicates removed; the series is
/// immutable once built and re-fetched whenever the request parameters change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceSeries {
    /// Ticker symbol the series belongs to
    pub ticker: String,
    /// Daily rows, sorted by date ascending
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Builds a series from unordered rows, sorting by date and dropping
    /// duplicate dates (first occurrence wins).
    pub fn new(ticker: impl Into<String>, mut points: Vec<PricePoint>) -> Self {
        let fetched = points.len();
        points.sort_by_key(|p| p.date);
        points.dedup_by_key(|p| p.date);
        if points.len() < fetched {
            debug!(
                dropped = fetched - points.len(),
                "dropped rows with duplicate dates"
            );
        }
        Self {
            ticker: ticker.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Last `n` rows of the series, used for the tabular preview panels.
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// The closing prices as (date, value) pairs, the shape the forecaster
    /// consumes.
    pub fn closes(&self) -> Vec<(NaiveDate, f64)> {
        self.points.iter().map(|p| (p.date, p.close)).collect()
    }
}

/// Inclusive date range selected in the dashboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Rejects ranges the data loader must fail fast on: a start after the
    /// end, or an end in the future.
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!(
                "start date {} is after end date {}",
                self.start, self.end
            ));
        }
        if self.end > today {
            return Err(format!("end date {} is in the future", self.end));
        }
        Ok(())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn series_is_sorted_and_deduplicated() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                PricePoint::new(d(2024, 1, 3), 1.0, 1.0, 1.0, 1.0, 10),
                PricePoint::new(d(2024, 1, 2), 2.0, 2.0, 2.0, 2.0, 20),
                PricePoint::new(d(2024, 1, 3), 3.0, 3.0, 3.0, 3.0, 30),
            ],
        );

        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(d(2024, 1, 2)));
        assert_eq!(series.last_date(), Some(d(2024, 1, 3)));
    }

    #[test]
    fn tail_returns_last_rows() {
        let points = (1..=10)
            .map(|i| PricePoint::new(d(2024, 1, i), 1.0, 1.0, 1.0, i as f64, 1))
            .collect();
        let series = PriceSeries::new("MSFT", points);

        let tail = series.tail(3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].date, d(2024, 1, 8));

        // Shorter series than the preview window returns everything.
        assert_eq!(series.tail(100).len(), 10);
    }

    #[test]
    fn date_range_validation() {
        let today = d(2024, 6, 1);

        assert!(DateRange::new(d(2015, 1, 1), d(2024, 1, 1))
            .validate(today)
            .is_ok());
        assert!(DateRange::new(d(2024, 1, 2), d(2024, 1, 1))
            .validate(today)
            .is_err());
        assert!(DateRange::new(d(2024, 1, 1), d(2024, 6, 2))
            .validate(today)
            .is_err());
    }

    #[test]
    fn date_range_contains_is_inclusive() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31));
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
    }
}
