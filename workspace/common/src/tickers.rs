use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fixed ticker set offered by the dashboard selector.
const SUPPORTED: &[(&str, &str)] = &[
    ("GOOG", "Alphabet Inc."),
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GME", "GameStop Corp."),
];

/// Metadata for one selectable ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TickerInfo {
    /// Short alphabetic code identifying the security
    pub symbol: String,
    /// Human-readable company name
    pub name: String,
}

/// All tickers the dashboard accepts, in selector order.
pub fn supported_tickers() -> Vec<TickerInfo> {
    SUPPORTED
        .iter()
        .map(|(symbol, name)| TickerInfo {
            symbol: (*symbol).to_string(),
            name: (*name).to_string(),
        })
        .collect()
}

/// Whether `symbol` is one of the supported tickers (case-insensitive).
pub fn is_supported(symbol: &str) -> bool {
    SUPPORTED
        .iter()
        .any(|(s, _)| s.eq_ignore_ascii_case(symbol))
}
