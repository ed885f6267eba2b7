use crate::router::create_router;
use crate::schemas::AppState;
use axum::Router;
use chrono::NaiveDate;
use moka::future::Cache;
use provider::FixtureProvider;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// "today" the fixture provider validates ranges against; fixed so tests do
/// not depend on the wall clock.
pub fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// Create AppState for testing, backed by the deterministic fixture provider
pub fn setup_test_app_state() -> AppState {
    let provider = FixtureProvider::new(fixture_today());
    let cache = Cache::new(100);

    AppState {
        provider: Arc::new(provider),
        cache,
    }
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is determined by the RUST_LOG environment variable,
/// defaulting to WARN if not set.
fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

/// Create axum app for testing
pub fn setup_test_app() -> Router {
    let _ = init_test_tracing();
    create_router(setup_test_app_state())
}
