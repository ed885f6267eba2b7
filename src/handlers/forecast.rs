use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::instrument;

use common::ForecastBundle;
use compute::ComputeError;

use crate::handlers::prices::{load_series, validate_ticker};
use crate::schemas::{
    error_response, ApiResponse, AppState, CachedData, ErrorResponse, ForecastQuery,
};

/// Forecast the closing prices of a ticker over a horizon of full years
#[utoipa::path(
    get,
    path = "/api/v1/forecast/{ticker}",
    tag = "forecast",
    params(
        ("ticker" = String, Path, description = "Ticker symbol (GOOG, AAPL, MSFT or GME)"),
        ("start_date" = Option<String>, Query, description = "Start date (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "End date (YYYY-MM-DD)"),
        ("years" = Option<u32>, Query, description = "Forecast horizon in years (1-8)"),
    ),
    responses(
        (status = 200, description = "Forecast computed successfully", body = ApiResponse<ForecastBundle>),
        (status = 400, description = "Unsupported ticker, invalid date range or horizon", body = ErrorResponse),
        (status = 422, description = "Series cannot be forecast", body = ErrorResponse),
        (status = 502, description = "Market-data source failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Path(ticker): Path<String>,
    Query(query): Query<ForecastQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ForecastBundle>>, (StatusCode, Json<ErrorResponse>)> {
    let ticker = validate_ticker(&ticker)?;
    let years = validate_years(query.years())?;
    let range = query.range();

    let cache_key = format!(
        "forecast_{}_{}_{}_{}",
        ticker, range.start, range.end, years
    );
    if let Some(CachedData::Forecast(bundle)) = state.cache.get(&cache_key).await {
        return Ok(Json(ApiResponse {
            data: bundle,
            message: "Forecast retrieved from cache".to_string(),
            success: true,
        }));
    }

    let (series, _) = load_series(&state, &ticker, range).await?;

    let bundle = compute::forecast_series(&series, compute::horizon_days(years))
        .map_err(compute_error)?;

    state
        .cache
        .insert(cache_key, CachedData::Forecast(bundle.clone()))
        .await;

    Ok(Json(ApiResponse {
        data: bundle,
        message: "Forecast computed successfully".to_string(),
        success: true,
    }))
}

/// The dashboard slider allows one to eight years of prediction.
pub(crate) fn validate_years(years: u32) -> Result<u32, (StatusCode, Json<ErrorResponse>)> {
    if !(1..=8).contains(&years) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "invalid_horizon",
            format!("forecast horizon must be between 1 and 8 years, got {years}"),
        ));
    }
    Ok(years)
}

/// Maps forecaster failures onto HTTP statuses.
fn compute_error(err: ComputeError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        ComputeError::EmptySeries | ComputeError::TooShort(_) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "series_not_forecastable",
            err.to_string(),
        ),
        ComputeError::InvalidHorizon(reason) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_horizon", reason)
        }
        other => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "forecast_failed",
            other.to_string(),
        ),
    }
}
