use axum::response::Json;
use tracing::instrument;

use common::{supported_tickers, TickerInfo};

use crate::schemas::ApiResponse;

/// List the tickers the dashboard selector offers
#[utoipa::path(
    get,
    path = "/api/v1/tickers",
    tag = "tickers",
    responses(
        (status = 200, description = "Supported tickers retrieved successfully", body = ApiResponse<Vec<TickerInfo>>)
    )
)]
#[instrument]
pub async fn get_tickers() -> Json<ApiResponse<Vec<TickerInfo>>> {
    Json(ApiResponse {
        data: supported_tickers(),
        message: "Supported tickers retrieved successfully".to_string(),
        success: true,
    })
}
