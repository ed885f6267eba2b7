#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use common::{ForecastBundle, PriceSeries, TickerInfo};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;
        response.assert_status(StatusCode::OK);

        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.provider, "fixture");
        assert_eq!(body.provider_url, "memory://fixture");
    }

    #[tokio::test]
    async fn test_tickers_listing() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/tickers").await;
        response.assert_status(StatusCode::OK);

        let body: ApiResponse<Vec<TickerInfo>> = response.json();
        assert!(body.success);
        let symbols: Vec<_> = body.data.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GOOG", "AAPL", "MSFT", "GME"]);
    }

    #[tokio::test]
    async fn test_prices_stay_within_requested_range() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/prices/AAPL")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .await;
        response.assert_status(StatusCode::OK);

        let body: ApiResponse<PriceSeries> = response.json();
        assert!(body.success);
        assert_eq!(body.data.ticker, "AAPL");
        // January 2024 has 23 weekdays.
        assert_eq!(body.data.len(), 23);
        for point in &body.data.points {
            assert!(point.date >= d(2024, 1, 1));
            assert!(point.date <= d(2024, 1, 31));
        }
    }

    #[tokio::test]
    async fn test_prices_are_memoized_per_parameter_set() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let first = server
            .get("/api/v1/prices/MSFT")
            .add_query_param("start_date", "2024-02-01")
            .add_query_param("end_date", "2024-02-29")
            .await;
        first.assert_status(StatusCode::OK);
        let first_body: ApiResponse<PriceSeries> = first.json();
        assert_eq!(first_body.message, "Price series retrieved successfully");

        let second = server
            .get("/api/v1/prices/MSFT")
            .add_query_param("start_date", "2024-02-01")
            .add_query_param("end_date", "2024-02-29")
            .await;
        second.assert_status(StatusCode::OK);
        let second_body: ApiResponse<PriceSeries> = second.json();
        assert_eq!(second_body.message, "Price series retrieved from cache");
        assert_eq!(second_body.data, first_body.data);
    }

    #[tokio::test]
    async fn test_prices_ticker_is_case_insensitive() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/prices/aapl")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-01-31")
            .await;
        response.assert_status(StatusCode::OK);

        let body: ApiResponse<PriceSeries> = response.json();
        assert_eq!(body.data.ticker, "AAPL");
    }

    #[tokio::test]
    async fn test_prices_unsupported_ticker_is_rejected() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/prices/TSLA").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "unsupported_ticker");
    }

    #[tokio::test]
    async fn test_prices_inverted_range_fails_fast() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/prices/AAPL")
            .add_query_param("start_date", "2024-03-01")
            .add_query_param("end_date", "2024-01-01")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "invalid_range");
    }

    #[tokio::test]
    async fn test_prices_future_end_date_fails_fast() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // The fixture provider's "today" is 2024-06-01.
        let response = server
            .get("/api/v1/prices/AAPL")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-06-02")
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "invalid_range");
    }

    #[tokio::test]
    async fn test_forecast_extends_history_by_the_horizon() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/forecast/GOOG")
            .add_query_param("start_date", "2023-01-01")
            .add_query_param("end_date", "2023-12-31")
            .add_query_param("years", "1")
            .await;
        response.assert_status(StatusCode::OK);

        let body: ApiResponse<ForecastBundle> = response.json();
        assert!(body.success);
        let bundle = body.data;
        assert_eq!(bundle.horizon_days, 365);

        // 2023 has 260 weekdays; the forecast covers each of them plus the
        // horizon, with strictly increasing dates.
        assert_eq!(bundle.forecast.len(), 260 + 365);
        for pair in bundle.forecast.points.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
        for point in &bundle.forecast.points {
            assert!(point.yhat_lower <= point.yhat);
            assert!(point.yhat <= point.yhat_upper);
        }

        // The last observation is Friday 2023-12-29.
        assert_eq!(
            bundle.forecast.last_date(),
            Some(d(2023, 12, 29) + chrono::Duration::days(365))
        );
    }

    #[tokio::test]
    async fn test_forecast_components_are_complete() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/api/v1/forecast/GME")
            .add_query_param("start_date", "2023-01-01")
            .add_query_param("end_date", "2023-12-31")
            .await;
        response.assert_status(StatusCode::OK);

        let body: ApiResponse<ForecastBundle> = response.json();
        let components = body.data.components;
        assert_eq!(components.weekly.len(), 7);
        assert_eq!(components.yearly.len(), 12);
        assert_eq!(components.trend.len(), body.data.forecast.len());
    }

    #[tokio::test]
    async fn test_forecast_horizon_bounds_are_enforced() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        for years in ["0", "9"] {
            let response = server
                .get("/api/v1/forecast/AAPL")
                .add_query_param("start_date", "2023-01-01")
                .add_query_param("end_date", "2023-12-31")
                .add_query_param("years", years)
                .await;
            response.assert_status(StatusCode::BAD_REQUEST);

            let body: ErrorResponse = response.json();
            assert_eq!(body.code, "invalid_horizon");
        }
    }

    #[tokio::test]
    async fn test_forecast_is_memoized_per_parameter_set() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let query = [
            ("start_date", "2023-06-01"),
            ("end_date", "2023-12-31"),
            ("years", "2"),
        ];

        let first = server
            .get("/api/v1/forecast/MSFT")
            .add_query_params(query)
            .await;
        first.assert_status(StatusCode::OK);
        let first_body: ApiResponse<ForecastBundle> = first.json();
        assert_eq!(first_body.message, "Forecast computed successfully");

        let second = server
            .get("/api/v1/forecast/MSFT")
            .add_query_params(query)
            .await;
        second.assert_status(StatusCode::OK);
        let second_body: ApiResponse<ForecastBundle> = second.json();
        assert_eq!(second_body.message, "Forecast retrieved from cache");
        assert_eq!(second_body.data, first_body.data);
    }

    /// The end-to-end scenario from the dashboard's defaults: nine years of
    /// history, one year of prediction.
    #[tokio::test]
    async fn test_forecast_nine_year_scenario() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let prices = server
            .get("/api/v1/prices/AAPL")
            .add_query_param("start_date", "2015-01-01")
            .add_query_param("end_date", "2024-01-01")
            .await;
        prices.assert_status(StatusCode::OK);
        let prices_body: ApiResponse<PriceSeries> = prices.json();
        // ~9 years of trading days.
        assert!(prices_body.data.len() > 2300);

        let forecast = server
            .get("/api/v1/forecast/AAPL")
            .add_query_param("start_date", "2015-01-01")
            .add_query_param("end_date", "2024-01-01")
            .add_query_param("years", "1")
            .await;
        forecast.assert_status(StatusCode::OK);
        let forecast_body: ApiResponse<ForecastBundle> = forecast.json();

        // 2024-01-01 is a Monday, so it is the last observation; the forecast
        // runs 365 daily steps past it.
        assert_eq!(
            forecast_body.data.forecast.last_date(),
            Some(d(2024, 12, 31))
        );
        assert_eq!(
            forecast_body.data.forecast.len(),
            prices_body.data.len() + 365
        );
    }

    #[tokio::test]
    async fn test_dashboard_renders_all_panels() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/")
            .add_query_param("ticker", "AAPL")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-03-29")
            .add_query_param("years", "1")
            .await;
        response.assert_status(StatusCode::OK);

        let html = response.text();
        assert!(html.contains("Stock Forecast App"));
        assert!(html.contains("Raw Data"));
        assert!(html.contains("Forecast Data"));
        assert!(html.contains("Time Series Data"));
        assert!(html.contains("Forecast Plot"));
        assert!(html.contains("Forecast Components"));
        assert!(html.contains("raw-chart"));
        assert!(html.contains("forecast-chart"));
        assert!(html.contains("trend-chart"));
    }

    #[tokio::test]
    async fn test_dashboard_defaults_to_first_ticker() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server
            .get("/dashboard")
            .add_query_param("start_date", "2024-01-01")
            .add_query_param("end_date", "2024-03-29")
            .await;
        response.assert_status(StatusCode::OK);

        let html = response.text();
        assert!(html.contains(r#"<option value="GOOG" selected>"#));
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_ticker() {
        let app = setup_test_app();
        let server = TestServer::new(app).unwrap();

        let response = server.get("/").add_query_param("ticker", "DOGE").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
