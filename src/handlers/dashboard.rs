//! The single-page dashboard: tabular previews, the historical chart and the
//! forecast with its components, rendered server-side.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
};
use tracing::instrument;

use common::{supported_tickers, DateRange, ForecastBundle, PriceSeries};

use crate::handlers::forecast::validate_years;
use crate::handlers::prices::{load_series, validate_ticker};
use crate::helpers::charts;
use crate::schemas::{AppState, DashboardQuery, ErrorResponse};

/// Rows shown in the tabular preview panels.
const PREVIEW_ROWS: usize = 5;

/// Render the dashboard page
#[instrument(skip(state))]
pub async fn dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let ticker = validate_ticker(query.ticker.as_deref().unwrap_or("GOOG"))?;
    let years = validate_years(query.years())?;
    let range = query.range();

    let (series, _) = load_series(&state, &ticker, range).await?;
    let bundle = compute::forecast_series(&series, compute::horizon_days(years)).map_err(|e| {
        crate::schemas::error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "series_not_forecastable",
            e.to_string(),
        )
    })?;

    Ok(Html(render_page(&ticker, range, years, &series, &bundle)))
}

fn render_page(
    ticker: &str,
    range: DateRange,
    years: u32,
    series: &PriceSeries,
    bundle: &ForecastBundle,
) -> String {
    let raw_chart = charts::raw_chart(series).to_inline_html(Some("raw-chart"));
    let forecast_chart =
        charts::forecast_chart(series, bundle).to_inline_html(Some("forecast-chart"));
    let trend_chart = charts::trend_chart(bundle).to_inline_html(Some("trend-chart"));
    let weekly_chart = charts::weekly_chart(bundle).to_inline_html(Some("weekly-chart"));
    let yearly_chart = charts::yearly_chart(bundle).to_inline_html(Some("yearly-chart"));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Stock Forecast App</title>
<script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
<style>
body {{
    background-color: #f8f9fa;
    color: #212529;
    font-family: 'Roboto', sans-serif;
    margin: 0;
    padding: 20px;
}}
.title-container {{
    text-align: center;
    padding: 30px;
    background-color: #007bff;
    border-radius: 15px;
    margin-bottom: 30px;
    box-shadow: 0 6px 12px rgba(0, 0, 0, 0.1);
}}
.title-container h1 {{
    font-size: 40px;
    color: #ffffff;
    margin: 0;
}}
.title-container h2 {{
    font-size: 26px;
    color: #e0e0e0;
    margin-top: 10px;
}}
.controls {{
    background-color: #ffffff;
    padding: 25px;
    border: 2px solid #007bff;
    border-radius: 10px;
    margin-bottom: 20px;
}}
.controls label {{
    margin-right: 6px;
    font-weight: bold;
}}
.controls select, .controls input {{
    margin-right: 18px;
}}
.chart-container, .dataframe-container {{
    background-color: #ffffff;
    padding: 25px;
    border-radius: 15px;
    box-shadow: 0 6px 12px rgba(0, 0, 0, 0.1);
    margin-bottom: 20px;
    overflow-x: auto;
}}
.equal-height {{
    display: flex;
    flex-direction: row;
    justify-content: space-between;
}}
.equal-height > div {{
    flex: 1;
    margin: 10px;
}}
table {{
    border-collapse: collapse;
    width: 100%;
}}
th, td {{
    border: 1px solid #dee2e6;
    padding: 6px 10px;
    text-align: right;
}}
th {{
    background-color: #007bff;
    color: #ffffff;
}}
details {{
    margin-bottom: 20px;
}}
summary {{
    font-size: 20px;
    font-weight: bold;
    cursor: pointer;
    padding: 10px 0;
}}
</style>
</head>
<body>
<div class="title-container">
    <h1>Stock Forecast App</h1>
    <h2>Explore stock predictions with an additive model and Plotly!</h2>
</div>

<form class="controls" method="get" action="/">
    <label for="ticker">Dataset for prediction</label>
    <select id="ticker" name="ticker">{ticker_options}</select>
    <label for="years">Years of prediction</label>
    <input id="years" type="number" name="years" min="1" max="8" value="{years}">
    <label for="start_date">Start date</label>
    <input id="start_date" type="date" name="start_date" value="{start}">
    <label for="end_date">End date</label>
    <input id="end_date" type="date" name="end_date" value="{end}">
    <button type="submit">Update</button>
</form>

<div class="equal-height">
    <div class="dataframe-container">
        <h3>Raw Data</h3>
        {raw_table}
    </div>
    <div class="dataframe-container">
        <h3>Forecast Data</h3>
        {forecast_table}
    </div>
</div>

<h3>Time Series Data</h3>
<div class="chart-container">{raw_chart}</div>

<details open>
    <summary>Forecast Plot</summary>
    <div class="chart-container">{forecast_chart}</div>
</details>

<details>
    <summary>Forecast Components</summary>
    <div class="chart-container">{trend_chart}</div>
    <div class="chart-container">{weekly_chart}</div>
    <div class="chart-container">{yearly_chart}</div>
</details>
</body>
</html>"#,
        ticker_options = ticker_options(ticker),
        years = years,
        start = range.start,
        end = range.end,
        raw_table = raw_table(series),
        forecast_table = forecast_table(bundle),
        raw_chart = raw_chart,
        forecast_chart = forecast_chart,
        trend_chart = trend_chart,
        weekly_chart = weekly_chart,
        yearly_chart = yearly_chart,
    )
}

fn ticker_options(selected: &str) -> String {
    supported_tickers()
        .into_iter()
        .map(|t| {
            let marker = if t.symbol == selected { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{} ({})</option>"#,
                t.symbol, marker, t.symbol, t.name
            )
        })
        .collect()
}

/// Last rows of the historical series.
fn raw_table(series: &PriceSeries) -> String {
    let rows: String = series
        .tail(PREVIEW_ROWS)
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>",
                p.date, p.open, p.high, p.low, p.close, p.volume
            )
        })
        .collect();
    format!(
        "<table><thead><tr><th>Date</th><th>Open</th><th>High</th><th>Low</th>\
         <th>Close</th><th>Volume</th></tr></thead><tbody>{rows}</tbody></table>"
    )
}

/// Last rows of the forecast. The original dashboard repeated the raw tail
/// here; showing the forecast tail is the intended behavior.
fn forecast_table(bundle: &ForecastBundle) -> String {
    let rows: String = bundle
        .forecast
        .tail(PREVIEW_ROWS)
        .iter()
        .map(|p| {
            format!(
                "<tr><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td></tr>",
                p.date, p.yhat, p.yhat_lower, p.yhat_upper
            )
        })
        .collect();
    format!(
        "<table><thead><tr><th>Date</th><th>Forecast</th><th>Lower</th><th>Upper</th>\
         </tr></thead><tbody>{rows}</tbody></table>"
    )
}
