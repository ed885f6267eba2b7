use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Point estimate with uncertainty bounds for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPoint {
    /// Date the prediction applies to
    pub date: NaiveDate,
    /// Point estimate
    pub yhat: f64,
    /// Lower uncertainty bound
    pub yhat_lower: f64,
    /// Upper uncertainty bound
    pub yhat_upper: f64,
}

impl ForecastPoint {
    pub fn new(date: NaiveDate, yhat: f64, yhat_lower: f64, yhat_upper: f64) -> Self {
        Self {
            date,
            yhat,
            yhat_lower,
            yhat_upper,
        }
    }
}

/// Predicted series covering every historical date plus the requested horizon.
///
/// Derived entirely from a [`crate::PriceSeries`]; recomputed on every
/// parameter change and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastTimeseries {
    /// Predictions, sorted by date ascending
    pub points: Vec<ForecastPoint>,
}

impl ForecastTimeseries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Last `n` rows, used for the forecast preview panel.
    pub fn tail(&self, n: usize) -> &[ForecastPoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    /// Predictions strictly after `last_observed`, i.e. the extension beyond
    /// the historical series.
    pub fn future_points(&self, last_observed: NaiveDate) -> Vec<&ForecastPoint> {
        self.points
            .iter()
            .filter(|p| p.date > last_observed)
            .collect()
    }
}

/// One value of a smooth component sampled at a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComponentPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One term of a periodic component, keyed by its label
/// (weekday name or month name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeasonalTerm {
    pub label: String,
    pub value: f64,
}

/// Additive decomposition of the forecast into a long-term trend and
/// periodic components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastComponents {
    /// Trend sampled at every forecast date
    pub trend: Vec<ComponentPoint>,
    /// Weekly cycle, one term per weekday starting Monday
    pub weekly: Vec<SeasonalTerm>,
    /// Yearly cycle, one term per month starting January
    pub yearly: Vec<SeasonalTerm>,
}

/// Forecast plus its decomposition, the payload of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastBundle {
    pub ticker: String,
    /// Horizon in days the forecast extends beyond the last observation
    pub horizon_days: u32,
    pub forecast: ForecastTimeseries,
    pub components: ForecastComponents,
}
