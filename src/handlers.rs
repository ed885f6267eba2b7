pub mod dashboard;
pub mod forecast;
pub mod health;
pub mod prices;
pub mod tickers;
