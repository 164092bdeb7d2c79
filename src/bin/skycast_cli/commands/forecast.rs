// ABOUTME: Warning and forecast commands for skycast-cli
// ABOUTME: Classifies a stored day and optionally streams LLM-generated prose to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use futures_util::StreamExt;
use skycast_hazards::ThresholdConfig;
use skycast_server::{
    config::ServerConfig,
    database::SqliteWeatherStore,
    errors::{AppError, AppResult},
    forecast::{daily_warnings, ForecastRequest, ForecastService},
    llm::{GroqProvider, LlmProvider},
};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;

use crate::helpers::display::{display_daily_warnings, display_warning_list};

type Result<T> = AppResult<T>;

fn load_thresholds() -> Result<ThresholdConfig> {
    ThresholdConfig::from_env().map_err(|e| AppError::config(e.to_string()))
}

/// Print the classified warnings for a date
pub async fn warnings(store: &SqliteWeatherStore, date: &str, json: bool) -> Result<()> {
    let thresholds = load_thresholds()?;
    let daily = daily_warnings(store, &thresholds, date).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&daily)?);
    } else {
        display_daily_warnings(&daily);
    }
    Ok(())
}

/// Generate a forecast, printing it whole or as it streams in
pub async fn generate(
    store: SqliteWeatherStore,
    config: &ServerConfig,
    date: String,
    style: Option<String>,
    length: Option<i64>,
    stream: bool,
) -> Result<()> {
    let llm = GroqProvider::from_config(&config.llm)?;
    let streaming = stream && llm.capabilities().supports_streaming();
    let service = ForecastService::new(
        Arc::new(store),
        Arc::new(llm),
        Arc::new(load_thresholds()?),
        config.llm.clone(),
    );

    let request = ForecastRequest {
        date,
        style,
        report_length: length,
    };

    if !streaming {
        let response = service.generate(&request).await?;
        println!("{}\n", response.forecast);
        display_warning_list(&response.disaster_warnings);
        return Ok(());
    }

    let (daily, mut chunks) = service.generate_stream(&request).await?;
    let mut stdout = io::stdout();
    let mut written = 0_usize;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        written += chunk.delta.len();
        write!(stdout, "{}", chunk.delta)
            .and_then(|()| stdout.flush())
            .map_err(|e| AppError::internal(format!("Failed to write to stdout: {e}")))?;
        if chunk.is_final {
            break;
        }
    }
    println!("\n");
    display_warning_list(&daily.disaster_warnings);
    info!(bytes = written, "Streamed forecast");
    Ok(())
}
