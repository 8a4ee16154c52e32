//! Entry point for mapcsv.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Set up logging to stderr.
//! 3. Convert the map file, creating the CSV only once the map data is found.
//! 4. Print the summary counters.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mapcsv::config::Config;
use mapcsv::converter::convert_file;

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("mapcsv={}", config.log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let options = config.convert_options();
    tracing::debug!("Converting with {:?}", options);

    let summary = convert_file(&config.input, &config.output, &options).with_context(|| {
        format!(
            "failed to convert {} to {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    println!("{}", summary);
    Ok(())
}
