// ABOUTME: HTTP server binary for the SkyCast forecast API
// ABOUTME: Loads configuration, connects the weather store and serves the API and frontend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # SkyCast Server Binary
//!
//! Serves forecast generation, hazard warnings and the static frontend.

use anyhow::{Context, Result};
use clap::Parser;
use skycast_hazards::ThresholdConfig;
use skycast_server::{
    config::ServerConfig,
    database::{SqliteWeatherStore, WeatherStore},
    forecast::ForecastService,
    llm::{GroqProvider, LlmProvider},
    logging,
    routes::build_router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "skycast-server")]
#[command(about = "SkyCast - weather forecasts and hazard warnings over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    logging::init_from_env()?;
    info!("Starting SkyCast forecast server");
    info!("{}", config.summary());

    let thresholds = ThresholdConfig::from_env().context("Invalid hazard thresholds")?;
    info!(?thresholds, "Hazard thresholds loaded");

    let store = SqliteWeatherStore::connect(&config.database).await?;
    store.migrate().await?;
    let store: Arc<dyn WeatherStore> = Arc::new(store);
    info!(backend = store.backend_name(), "Weather store ready");

    let llm: Arc<dyn LlmProvider> = Arc::new(GroqProvider::from_config(&config.llm)?);
    info!(
        provider = llm.name(),
        model = llm.default_model(),
        "LLM provider ready"
    );

    let service = Arc::new(ForecastService::new(
        store,
        llm,
        Arc::new(thresholds),
        config.llm.clone(),
    ));
    let app = build_router(service, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    display_available_endpoints(&config);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {e}");
        return Err(e.into());
    }

    info!("SkyCast server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    info!("Shutdown signal received, draining connections");
}

fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Generate Forecast: POST http://{host}:{port}/api/generate_forecast");
    info!("   Hazard Warnings:   POST http://{host}:{port}/api/warnings");
    info!("   API Info:          GET  http://{host}:{port}/api");
    info!("   Health Check:      GET  http://{host}:{port}/health");
    info!(
        "   Frontend:          GET  http://{host}:{port}/ ({})",
        config.frontend_dir.display()
    );
    info!("=== End of Endpoint List ===");
}
