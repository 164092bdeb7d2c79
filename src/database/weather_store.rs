// ABOUTME: SQLite-backed weather store built on a sqlx connection pool
// ABOUTME: Creates the observations table, imports records and resolves date lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use super::{candidate_date_keys, StoredWeather, WeatherStore};
use crate::config::environment::DatabaseUrl;
use crate::constants::storage::{MISS_SAMPLE_SIZE, WEATHER_TABLE};
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use skycast_hazards::WeatherRecord;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Measurement columns, one per `WeatherRecord` field
pub const MEASUREMENT_COLUMNS: [&str; 19] = [
    "temperature_2m",
    "apparent_temperature",
    "relative_humidity_2m",
    "dew_point_2m",
    "precipitation",
    "rain",
    "snowfall",
    "snow_depth",
    "pressure_msl",
    "surface_pressure",
    "cloud_cover",
    "cloud_cover_low",
    "cloud_cover_mid",
    "cloud_cover_high",
    "wind_speed_10m",
    "wind_speed_100m",
    "wind_direction_10m",
    "wind_direction_100m",
    "wind_gusts_10m",
];

/// Weather store over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteWeatherStore {
    pool: SqlitePool,
}

impl SqliteWeatherStore {
    /// Connect to the database, creating the file and its directory if needed
    ///
    /// In-memory databases are limited to a single connection so that every
    /// query sees the same data.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the pool
    /// fails to connect
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            DatabaseUrl::Memory => SqlitePoolOptions::new()
                .max_connections(1)
                .connect(&url.to_connection_string())
                .await
                .map_err(|e| write_error("connect", e))?,
            DatabaseUrl::SQLite { path } => {
                ensure_parent_dir(path).await?;
                // mode=rwc creates the file on first use
                let connection_string = format!("{}?mode=rwc", url.to_connection_string());
                SqlitePool::connect(&connection_string)
                    .await
                    .map_err(|e| write_error("connect", e))?
            }
        };

        info!(database = %url, "Weather store connected");
        Ok(Self { pool })
    }

    /// Create the observations table and its date index
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        let columns: String = MEASUREMENT_COLUMNS
            .iter()
            .map(|column| format!(",\n                {column} REAL"))
            .collect();

        sqlx::query(&format!(
            r"
            CREATE TABLE IF NOT EXISTS {WEATHER_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL{columns}
            )
            "
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create observations table", e))?;

        sqlx::query(&format!(
            "CREATE INDEX IF NOT EXISTS idx_{WEATHER_TABLE}_date ON {WEATHER_TABLE}(date)"
        ))
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("create date index", e))?;

        debug!("Weather store schema is up to date");
        Ok(())
    }

    /// Insert one observation day
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when the record has no date, or
    /// `DatabaseError` if the insert fails
    pub async fn insert(&self, record: &WeatherRecord) -> AppResult<()> {
        let mut connection = self
            .pool
            .acquire()
            .await
            .map_err(|e| write_error("acquire connection", e))?;
        insert_record(&mut connection, record).await
    }

    /// Insert many observation days in one transaction
    ///
    /// # Errors
    ///
    /// Returns the first failing record's error; nothing is written in that case
    pub async fn insert_many(&self, records: &[WeatherRecord]) -> AppResult<usize> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| write_error("begin transaction", e))?;

        for record in records {
            insert_record(&mut tx, record).await?;
        }

        tx.commit()
            .await
            .map_err(|e| write_error("commit transaction", e))?;
        info!(count = records.len(), "Imported weather records");
        Ok(records.len())
    }

    async fn find_exact(&self, key: &str) -> AppResult<Option<SqliteRow>> {
        sqlx::query(&format!(
            "SELECT * FROM {WEATHER_TABLE} WHERE date = ?1 ORDER BY id LIMIT 1"
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)
    }

    async fn find_prefix(&self, day: &str) -> AppResult<Option<SqliteRow>> {
        sqlx::query(&format!(
            "SELECT * FROM {WEATHER_TABLE} WHERE date LIKE ?1 || '%' ORDER BY date, id LIMIT 1"
        ))
        .bind(day)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)
    }

    async fn log_miss(&self, day: &str) {
        match self.sample_dates(MISS_SAMPLE_SIZE).await {
            Ok(samples) if samples.is_empty() => {
                warn!(date = %day, "No weather data found; the store is empty");
            }
            Ok(samples) => {
                warn!(date = %day, sample_dates = ?samples, "No weather data found for date");
            }
            Err(e) => {
                warn!(date = %day, error = %e, "No weather data found; sampling stored dates failed");
            }
        }
    }
}

#[async_trait]
impl WeatherStore for SqliteWeatherStore {
    #[instrument(skip(self), fields(backend = "sqlite"))]
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<StoredWeather>> {
        let keys = candidate_date_keys(date);

        for key in &keys {
            if let Some(row) = self.find_exact(key).await? {
                debug!(key = %key, "Matched weather row by exact date");
                return Ok(Some(row_to_stored(&row)));
            }
        }

        let day = &keys[0];
        if let Some(row) = self.find_prefix(day).await? {
            debug!(prefix = %day, "Matched weather row by date prefix");
            return Ok(Some(row_to_stored(&row)));
        }

        self.log_miss(day).await;
        Ok(None)
    }

    async fn sample_dates(&self, limit: i64) -> AppResult<Vec<String>> {
        let rows = sqlx::query(&format!(
            "SELECT date FROM {WEATHER_TABLE} ORDER BY date LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(rows
            .iter()
            .filter_map(|row| row.try_get::<String, _>("date").ok())
            .collect())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(read_error)?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "SQLite"
    }
}

async fn insert_record(
    connection: &mut SqliteConnection,
    record: &WeatherRecord,
) -> AppResult<()> {
    let date = record
        .date
        .as_deref()
        .filter(|date| !date.trim().is_empty())
        .ok_or_else(|| {
            AppError::new(
                ErrorCode::MissingRequiredField,
                "Weather record is missing its date",
            )
        })?;

    let placeholders: String = (2..=MEASUREMENT_COLUMNS.len() + 1)
        .map(|index| format!(", ?{index}"))
        .collect();
    let sql = format!(
        "INSERT INTO {WEATHER_TABLE} (date, {}) VALUES (?1{placeholders})",
        MEASUREMENT_COLUMNS.join(", ")
    );

    let values = record.to_json();
    let mut query = sqlx::query(&sql).bind(date);
    for column in MEASUREMENT_COLUMNS {
        query = query.bind(values.get(column).and_then(Value::as_f64));
    }

    query
        .execute(&mut *connection)
        .await
        .map_err(|e| write_error("insert weather record", e))?;
    Ok(())
}

/// Read a row leniently: numbers stay numbers, text goes through the record's coercion
fn row_to_stored(row: &SqliteRow) -> StoredWeather {
    let stored_date = row.try_get::<String, _>("date").unwrap_or_default();

    let mut fields = Map::new();
    fields.insert("date".to_owned(), Value::String(stored_date.clone()));
    for column in MEASUREMENT_COLUMNS {
        let value = row
            .try_get::<Option<f64>, _>(column)
            .ok()
            .flatten()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .or_else(|| {
                row.try_get::<Option<String>, _>(column)
                    .ok()
                    .flatten()
                    .map(Value::String)
            });
        if let Some(value) = value {
            fields.insert(column.to_owned(), value);
        }
    }

    StoredWeather {
        stored_date,
        record: WeatherRecord::from_json(&Value::Object(fields)),
    }
}

async fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

fn read_error(error: sqlx::Error) -> AppError {
    AppError::unavailable("Database connection is not available").with_source(error)
}

fn write_error(operation: &str, error: sqlx::Error) -> AppError {
    AppError::database(format!("Failed to {operation}: {error}")).with_source(error)
}
