use anyhow::Result;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;

use provider::YahooProvider;

use crate::schemas::AppState;

/// Time-to-live of memoized fetch and forecast results.
const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Initialize application configuration and state
pub async fn initialize_app_state(provider_url: &str) -> Result<AppState> {
    let cache_ttl = std::env::var("CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_CACHE_TTL_SECS);

    tracing::info!("Using market-data provider at {}", provider_url);
    let provider = YahooProvider::new(provider_url)?;

    // Memoizes load and forecast results keyed by their request parameters.
    let cache = Cache::builder()
        .max_capacity(1000)
        .time_to_live(Duration::from_secs(cache_ttl))
        .build();

    Ok(AppState {
        provider: Arc::new(provider),
        cache,
    })
}
