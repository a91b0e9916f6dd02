//! # dopc
//!
//! ```text
//! $ dopc --venue-slug home-assignment-venue-helsinki --cart-value 8.90 --lat 60.17594 --lon 24.93087
//! Price breakdown
//! Cart value             8,90 €
//! Delivery fee           3,46 €
//! Delivery distance       556 m
//! Small order surcharge  1,10 €
//! Total price           13,46 €
//! ```
//!
//! Results go to stdout, logs and errors to stderr. Exit codes: 0 priced,
//! 1 venue or delivery failure, 2 invalid input or config.

use std::process::ExitCode;

use clap::Parser;

use dopc_cli::cli::Cli;
use dopc_cli::error::EXIT_OK;
use dopc_cli::output;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dopc_cli::init_tracing();
    let cli = Cli::parse();

    let calculation = match dopc_cli::run(&cli).await {
        Ok(calculation) => calculation,
        Err(err) => {
            eprintln!("{}", err.user_message());
            return Ok(ExitCode::from(err.exit_code()));
        }
    };

    let rendered = if cli.json {
        output::render_json(&calculation)?
    } else {
        output::render_text(&calculation.result)
    };
    println!("{}", rendered);

    Ok(ExitCode::from(EXIT_OK))
}
