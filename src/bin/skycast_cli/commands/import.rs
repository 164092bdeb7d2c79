// ABOUTME: Import command loading weather observations from a JSON file
// ABOUTME: Accepts an array of observation objects, each carrying its own date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use serde_json::Value;
use skycast_hazards::WeatherRecord;
use skycast_server::{
    database::SqliteWeatherStore,
    errors::{AppError, AppResult},
};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

type Result<T> = AppResult<T>;

/// Read a JSON array of observations and store every entry that has a date
pub async fn run(store: &SqliteWeatherStore, file: &Path) -> Result<()> {
    let text = fs::read_to_string(file).await.map_err(|e| {
        AppError::invalid_input(format!("Failed to read {}: {e}", file.display()))
    })?;
    let document: Value = serde_json::from_str(&text)?;

    let entries = match document {
        Value::Array(entries) => entries,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(AppError::invalid_format(
                "Expected a JSON array of weather observations",
            ))
        }
    };

    let (records, skipped): (Vec<WeatherRecord>, Vec<WeatherRecord>) = entries
        .iter()
        .map(WeatherRecord::from_json)
        .partition(|record| record.date.as_deref().is_some_and(|d| !d.trim().is_empty()));

    if !skipped.is_empty() {
        warn!(count = skipped.len(), "Skipping observations without a date");
    }

    let imported = store.insert_many(&records).await?;
    info!(file = %file.display(), imported, "Import finished");
    println!(
        "Imported {imported} observations from {} ({} skipped)",
        file.display(),
        skipped.len()
    );
    Ok(())
}
