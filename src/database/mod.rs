// ABOUTME: Weather observation storage abstraction and its SQLite implementation
// ABOUTME: Looks up one observation day by calendar date with lenient date-key matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # Weather Store
//!
//! The forecast pipeline only needs to read a single day of observations,
//! so the [`WeatherStore`] trait stays small. Writes are specific to the
//! `SQLite` backend and used by the import command and tests.

mod weather_store;

pub use weather_store::{SqliteWeatherStore, MEASUREMENT_COLUMNS};

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use skycast_hazards::WeatherRecord;

/// One observation day returned by a store lookup
#[derive(Debug, Clone, PartialEq)]
pub struct StoredWeather {
    /// Date key exactly as stored (may carry a time component)
    pub stored_date: String,
    /// Measurements read from the row
    pub record: WeatherRecord,
}

/// Read access to stored weather observations
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Find the observation for a calendar date
    ///
    /// Returns `Ok(None)` when no row matches any accepted date key format.
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<StoredWeather>>;

    /// A few stored date keys, used to explain lookup misses
    async fn sample_dates(&self, limit: i64) -> AppResult<Vec<String>>;

    /// Check the backend is reachable
    async fn ping(&self) -> AppResult<()>;

    /// Short backend description for logs
    fn backend_name(&self) -> &'static str;
}

/// Date keys tried for an exact match, in order
#[must_use]
pub fn candidate_date_keys(date: NaiveDate) -> [String; 4] {
    let day = date.format("%Y-%m-%d").to_string();
    [
        day.clone(),
        format!("{day}T00:00:00Z"),
        format!("{day} 00:00:00+00:00"),
        format!("{day} 23:00:00+00:00"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_keys_in_lookup_order() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        assert_eq!(
            candidate_date_keys(date),
            [
                "2024-07-14".to_owned(),
                "2024-07-14T00:00:00Z".to_owned(),
                "2024-07-14 00:00:00+00:00".to_owned(),
                "2024-07-14 23:00:00+00:00".to_owned(),
            ]
        );
    }
}
