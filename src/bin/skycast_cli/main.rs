// ABOUTME: SkyCast CLI - command-line access to warnings, forecasts and data import
// ABOUTME: Works directly against the weather store without running the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence
//!
//! Usage:
//! ```bash
//! # Load observations exported as a JSON array
//! skycast-cli import --file data/observations.json
//!
//! # Show the hazard warnings for a date
//! skycast-cli warnings --date 2024-07-14
//!
//! # Generate a 150-word broadcast-style forecast, streaming the text
//! skycast-cli forecast --date 2024-07-14 --style broadcast --length 150 --stream
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use skycast_server::{
    config::{DatabaseUrl, ServerConfig},
    database::SqliteWeatherStore,
    errors::AppResult,
    logging::LoggingConfig,
};
use std::path::PathBuf;
use tracing::debug;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "skycast-cli",
    about = "SkyCast command-line client",
    long_about = "Inspect hazard warnings, generate forecasts and import weather observations."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Show the hazard warnings for a date
    Warnings {
        /// Date to look up (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Print the raw JSON response instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Generate a forecast for a date
    Forecast {
        /// Date to forecast (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Writing style: balanced, detailed, casual or broadcast
        #[arg(long)]
        style: Option<String>,

        /// Target length in words (50-1000)
        #[arg(long)]
        length: Option<i64>,

        /// Print the forecast as it is generated
        #[arg(long)]
        stream: bool,
    },

    /// Import weather observations from a JSON file
    Import {
        /// File holding a JSON array of observation objects
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::for_cli();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = cli.database_url.as_deref() {
        config.database = DatabaseUrl::parse_url(url);
    }
    debug!("{}", config.summary());

    let store = SqliteWeatherStore::connect(&config.database).await?;
    store.migrate().await?;

    match cli.command {
        Command::Warnings { date, json } => {
            commands::forecast::warnings(&store, &date, json).await?;
        }
        Command::Forecast {
            date,
            style,
            length,
            stream,
        } => {
            commands::forecast::generate(store, &config, date, style, length, stream).await?;
        }
        Command::Import { file } => {
            commands::import::run(&store, &file).await?;
        }
    }

    Ok(())
}
