use crate::handlers::{
    dashboard::dashboard, forecast::get_forecast, health::health_check, prices::get_prices,
    tickers::get_tickers,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(dashboard))
        .route("/dashboard", get(dashboard))
        // Health check
        .route("/health", get(health_check))
        // API v1 routes
        .route("/api/v1/tickers", get(get_tickers))
        .route("/api/v1/prices/:ticker", get(get_prices))
        .route("/api/v1/forecast/:ticker", get(get_forecast))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
