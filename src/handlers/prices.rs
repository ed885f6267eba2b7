use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::instrument;

use common::{DateRange, PriceSeries};
use provider::ProviderError;

use crate::schemas::{error_response, ApiResponse, AppState, CachedData, ErrorResponse, PricesQuery};

/// Get the historical daily price series for a ticker
#[utoipa::path(
    get,
    path = "/api/v1/prices/{ticker}",
    tag = "prices",
    params(
        ("ticker" = String, Path, description = "Ticker symbol (GOOG, AAPL, MSFT or GME)"),
        ("start_date" = Option<String>, Query, description = "Start date (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "End date (YYYY-MM-DD)"),
    ),
    responses(
        (status = 200, description = "Price series retrieved successfully", body = ApiResponse<PriceSeries>),
        (status = 400, description = "Unsupported ticker or invalid date range", body = ErrorResponse),
        (status = 502, description = "Market-data source failed", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_prices(
    Path(ticker): Path<String>,
    Query(query): Query<PricesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PriceSeries>>, (StatusCode, Json<ErrorResponse>)> {
    let ticker = validate_ticker(&ticker)?;
    let range = query.range();

    let (series, from_cache) = load_series(&state, &ticker, range).await?;

    let message = if from_cache {
        "Price series retrieved from cache"
    } else {
        "Price series retrieved successfully"
    };
    Ok(Json(ApiResponse {
        data: series,
        message: message.to_string(),
        success: true,
    }))
}

/// Rejects symbols outside the dashboard's fixed selector set.
pub(crate) fn validate_ticker(
    ticker: &str,
) -> Result<String, (StatusCode, Json<ErrorResponse>)> {
    let upper = ticker.to_uppercase();
    if !common::is_supported(&upper) {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "unsupported_ticker",
            format!("ticker {upper} is not in the supported set"),
        ));
    }
    Ok(upper)
}

/// Loads a series through the memoization cache; the boolean reports whether
/// the result was already cached.
pub(crate) async fn load_series(
    state: &AppState,
    ticker: &str,
    range: DateRange,
) -> Result<(PriceSeries, bool), (StatusCode, Json<ErrorResponse>)> {
    let cache_key = format!("prices_{}_{}_{}", ticker, range.start, range.end);

    if let Some(CachedData::Prices(series)) = state.cache.get(&cache_key).await {
        return Ok((series, true));
    }

    let series = state
        .provider
        .fetch_daily(ticker, range)
        .await
        .map_err(provider_error)?;

    state
        .cache
        .insert(cache_key, CachedData::Prices(series.clone()))
        .await;
    Ok((series, false))
}

/// Maps data-loader failures onto HTTP statuses: caller mistakes are 400s,
/// upstream trouble is a 502.
fn provider_error(err: ProviderError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        ProviderError::InvalidRange(reason) => {
            error_response(StatusCode::BAD_REQUEST, "invalid_range", reason)
        }
        ProviderError::UnknownTicker { ticker, reason } => error_response(
            StatusCode::BAD_REQUEST,
            "unknown_ticker",
            format!("{ticker}: {reason}"),
        ),
        ProviderError::EmptySeries { ticker, reason } => error_response(
            StatusCode::BAD_GATEWAY,
            "empty_series",
            format!("{ticker}: {reason}"),
        ),
        ProviderError::Http(e) => {
            error_response(StatusCode::BAD_GATEWAY, "upstream_unreachable", e.to_string())
        }
        ProviderError::Payload(reason) => {
            error_response(StatusCode::BAD_GATEWAY, "malformed_payload", reason)
        }
    }
}
