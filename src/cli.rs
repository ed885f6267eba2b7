use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::{fetch, forecast, serve};

const DEFAULT_PROVIDER_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(about = "Stock forecast dashboard with a web server and CLI tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the dashboard web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Base URL of the market-data chart API
        #[arg(short, long, env = "PROVIDER_BASE_URL", default_value = DEFAULT_PROVIDER_URL)]
        provider_url: String,
    },
    /// Fetch a daily price series and print it as JSON
    Fetch {
        /// Ticker symbol, e.g. AAPL
        ticker: String,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long, default_value = "2015-01-01")]
        start_date: NaiveDate,

        /// End date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        end_date: Option<NaiveDate>,

        /// Base URL of the market-data chart API
        #[arg(short, long, env = "PROVIDER_BASE_URL", default_value = DEFAULT_PROVIDER_URL)]
        provider_url: String,
    },
    /// Fetch a price series, run the forecaster and print the result as JSON
    Forecast {
        /// Ticker symbol, e.g. AAPL
        ticker: String,

        /// Start date (YYYY-MM-DD)
        #[arg(short, long, default_value = "2015-01-01")]
        start_date: NaiveDate,

        /// End date (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        end_date: Option<NaiveDate>,

        /// Forecast horizon in years (1-8)
        #[arg(short = 'y', long, default_value_t = 1)]
        years: u32,

        /// Base URL of the market-data chart API
        #[arg(short, long, env = "PROVIDER_BASE_URL", default_value = DEFAULT_PROVIDER_URL)]
        provider_url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                provider_url,
            } => {
                serve(&bind_address, &provider_url).await?;
            }
            Commands::Fetch {
                ticker,
                start_date,
                end_date,
                provider_url,
            } => {
                fetch(&ticker, start_date, end_date, &provider_url).await?;
            }
            Commands::Forecast {
                ticker,
                start_date,
                end_date,
                years,
                provider_url,
            } => {
                forecast(&ticker, start_date, end_date, years, &provider_url).await?;
            }
        }
        Ok(())
    }
}
