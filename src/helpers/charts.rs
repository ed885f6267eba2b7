//! Server-side chart builders for the dashboard page.
//!
//! Each builder returns a [`Plot`] the dashboard handler embeds with
//! `to_inline_html`; plotly.js itself is loaded from a CDN by the page shell.

use plotly::common::{Fill, Line, Marker, Mode, Title};
use plotly::layout::{Axis, RangeSlider};
use plotly::{Layout, Plot, Scatter};

use common::{ForecastBundle, PriceSeries};

/// Open and close traces over the historical range, with a range slider.
pub fn raw_chart(series: &PriceSeries) -> Plot {
    let dates: Vec<String> = series.points.iter().map(|p| p.date.to_string()).collect();
    let opens: Vec<f64> = series.points.iter().map(|p| p.open).collect();
    let closes: Vec<f64> = series.points.iter().map(|p| p.close).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(dates.clone(), opens)
            .mode(Mode::Lines)
            .name("Stock Open")
            .line(Line::new().color("royalblue").width(2.0)),
    );
    plot.add_trace(
        Scatter::new(dates, closes)
            .mode(Mode::Lines)
            .name("Stock Close")
            .line(Line::new().color("firebrick").width(2.0)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Time Series Data with Rangeslider"))
            .x_axis(
                Axis::new()
                    .title(Title::with_text("Date"))
                    .range_slider(RangeSlider::new().visible(true)),
            )
            .y_axis(Axis::new().title(Title::with_text("Price")))
            .height(600),
    );
    plot
}

/// Observed closes, forecast line and shaded uncertainty band.
pub fn forecast_chart(series: &PriceSeries, bundle: &ForecastBundle) -> Plot {
    let forecast_dates: Vec<String> = bundle
        .forecast
        .points
        .iter()
        .map(|p| p.date.to_string())
        .collect();
    let yhat: Vec<f64> = bundle.forecast.points.iter().map(|p| p.yhat).collect();
    let lower: Vec<f64> = bundle
        .forecast
        .points
        .iter()
        .map(|p| p.yhat_lower)
        .collect();
    let upper: Vec<f64> = bundle
        .forecast
        .points
        .iter()
        .map(|p| p.yhat_upper)
        .collect();

    let observed_dates: Vec<String> = series.points.iter().map(|p| p.date.to_string()).collect();
    let observed: Vec<f64> = series.points.iter().map(|p| p.close).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(forecast_dates.clone(), lower)
            .mode(Mode::Lines)
            .name("Lower bound")
            .line(Line::new().color("rgba(0, 123, 255, 0.2)").width(0.0))
            .show_legend(false),
    );
    plot.add_trace(
        Scatter::new(forecast_dates.clone(), upper)
            .mode(Mode::Lines)
            .name("Uncertainty")
            .fill(Fill::ToNextY)
            .line(Line::new().color("rgba(0, 123, 255, 0.2)").width(0.0)),
    );
    plot.add_trace(
        Scatter::new(forecast_dates, yhat)
            .mode(Mode::Lines)
            .name("Forecast")
            .line(Line::new().color("#007bff").width(2.0)),
    );
    plot.add_trace(
        Scatter::new(observed_dates, observed)
            .mode(Mode::Markers)
            .name("Observed")
            .marker(Marker::new().color("#212529").size(3)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Forecast Plot"))
            .x_axis(Axis::new().title(Title::with_text("Date")))
            .y_axis(Axis::new().title(Title::with_text("Price")))
            .height(500),
    );
    plot
}

/// Long-term trend component over the full forecast range.
pub fn trend_chart(bundle: &ForecastBundle) -> Plot {
    let dates: Vec<String> = bundle
        .components
        .trend
        .iter()
        .map(|p| p.date.to_string())
        .collect();
    let values: Vec<f64> = bundle.components.trend.iter().map(|p| p.value).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(dates, values)
            .mode(Mode::Lines)
            .name("Trend")
            .line(Line::new().color("#007bff").width(2.0)),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text("Trend"))
            .x_axis(Axis::new().title(Title::with_text("Date")))
            .height(350),
    );
    plot
}

/// Weekly cycle, one term per weekday.
pub fn weekly_chart(bundle: &ForecastBundle) -> Plot {
    seasonal_chart(
        "Weekly seasonality",
        bundle
            .components
            .weekly
            .iter()
            .map(|t| (t.label.clone(), t.value))
            .collect(),
    )
}

/// Yearly cycle, one term per month.
pub fn yearly_chart(bundle: &ForecastBundle) -> Plot {
    seasonal_chart(
        "Yearly seasonality",
        bundle
            .components
            .yearly
            .iter()
            .map(|t| (t.label.clone(), t.value))
            .collect(),
    )
}

fn seasonal_chart(title: &str, terms: Vec<(String, f64)>) -> Plot {
    let (labels, values): (Vec<String>, Vec<f64>) = terms.into_iter().unzip();

    let mut plot = Plot::new();
    plot.add_trace(
        Scatter::new(labels, values)
            .mode(Mode::LinesMarkers)
            .name(title)
            .line(Line::new().color("#007bff").width(2.0)),
    );
    plot.set_layout(Layout::new().title(Title::with_text(title)).height(350));
    plot
}
