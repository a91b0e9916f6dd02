//! # DOPC Command Line
//!
//! Prices one delivery order from the command line.
//!
//! ## Module Organization
//! ```text
//! dopc_cli/
//! ├── main.rs         ◄─── process entry, exit codes
//! ├── lib.rs          ◄─── You are here (run, tracing)
//! ├── cli.rs          ◄─── clap flags
//! ├── config.rs       ◄─── DopcConfig: defaults, TOML, environment
//! ├── calculator.rs   ◄─── DeliveryCalculator: validate, fetch, price
//! ├── output.rs       ◄─── text and JSON breakdown
//! └── error.rs        ◄─── AppError, user messages, exit codes
//! ```
//!
//! ## Run Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load config       defaults → file → environment → flags             │
//! │  2. Validate config   http(s) URL, timeout > 0                          │
//! │  3. Build client      HttpVenueClient(base_url, timeout)                │
//! │  4. Calculate         form → venue (static + dynamic) → PriceResult     │
//! │  5. Render            text breakdown or --json                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod calculator;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;

use tracing::info;
use tracing_subscriber::EnvFilter;

use dopc_venue::HttpVenueClient;

use calculator::{Calculation, DeliveryCalculator};
use cli::Cli;
use config::DopcConfig;
use error::AppResult;

/// Runs one calculation with flags layered over the loaded config.
pub async fn run(cli: &Cli) -> AppResult<Calculation> {
    let mut config = DopcConfig::load(cli.config.as_deref())?;
    cli.apply_to(&mut config);
    config.validate()?;

    info!(api = %config.api.base_url, "Using venue API");
    let client = HttpVenueClient::new(&config.api.base_url, config.api.timeout())?;
    let calculator = DeliveryCalculator::new(client);

    calculator.calculate(&cli.form(&config)).await
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show request URLs and tier selection
/// - Default: warnings, plus info from the dopc crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,dopc=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
