// ABOUTME: Forecast request types, style selection and input validation
// ABOUTME: Ties the weather store, hazard classifier and LLM client into one pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # Forecast Generation
//!
//! A forecast request names a calendar date, a writing style and a target
//! length in words. The pipeline looks the date up in the weather store,
//! classifies hazards, renders a prompt and asks the LLM for prose.

pub mod prompt;
mod service;

pub use service::{daily_warnings, ForecastService};

use crate::constants::forecast::{
    DATE_FORMAT, DEFAULT_REPORT_LENGTH, MAX_REPORT_LENGTH, MIN_REPORT_LENGTH,
};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use skycast_hazards::{WarningSet, WeatherRecord};
use std::fmt;

/// Writing style requested for the forecast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastStyle {
    /// Alternates between detailed and conversational summaries
    #[default]
    Balanced,
    /// Technical meteorological detail
    Detailed,
    /// Conversational, as if talking to a friend
    Casual,
    /// Weather reporter's broadcast script
    Broadcast,
}

impl ForecastStyle {
    /// Parse a style name; unknown or missing names fall back to `Balanced`
    #[must_use]
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(|n| n.trim().to_ascii_lowercase()).as_deref() {
            Some("detailed") => Self::Detailed,
            Some("casual") => Self::Casual,
            Some("broadcast") => Self::Broadcast,
            _ => Self::Balanced,
        }
    }

    /// Lowercase style name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::Detailed => "detailed",
            Self::Casual => "casual",
            Self::Broadcast => "broadcast",
        }
    }

    /// Prompt sentence describing the style
    #[must_use]
    pub const fn instruction(&self) -> &'static str {
        match self {
            Self::Balanced => "Vary the summary format. Sometimes make it detailed and scientific, other times casual and conversational.",
            Self::Detailed => "Make the forecast detailed and scientific with technical meteorological information.",
            Self::Casual => "Make the forecast casual and conversational, as if talking to a friend.",
            Self::Broadcast => "Format the forecast like a professional weather reporter's broadcast script.",
        }
    }
}

impl fmt::Display for ForecastStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/generate_forecast`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Style name; defaults to `balanced`
    #[serde(default)]
    pub style: Option<String>,
    /// Target length in words; defaults to 200
    #[serde(default)]
    pub report_length: Option<i64>,
}

impl ForecastRequest {
    /// Request with default style and length
    #[must_use]
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            style: None,
            report_length: None,
        }
    }
}

/// Body of `POST /api/warnings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningsRequest {
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
}

/// Stored observation and its classified hazards for one date
#[derive(Debug, Clone, Serialize)]
pub struct DailyWarnings {
    /// Date as requested
    pub date: String,
    /// Measurements found in the store
    pub data_used: WeatherRecord,
    /// Hazard warnings keyed by category, in evaluation order
    pub disaster_warnings: WarningSet,
}

/// Generated forecast returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResponse {
    /// Date as requested
    pub date: String,
    /// Generated prose
    pub forecast: String,
    /// Measurements the forecast was based on
    pub data_used: WeatherRecord,
    /// Hazard warnings keyed by category, in evaluation order
    pub disaster_warnings: WarningSet,
}

/// Parse a `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns `InvalidFormat` for anything else
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::invalid_format("Invalid date format. Use YYYY-MM-DD"))
}

/// Resolve the requested report length
///
/// # Errors
///
/// Returns `ValueOutOfRange` when the length is outside 50..=1000 words
pub fn validate_report_length(requested: Option<i64>) -> AppResult<u32> {
    let Some(length) = requested else {
        return Ok(DEFAULT_REPORT_LENGTH);
    };

    u32::try_from(length)
        .ok()
        .filter(|words| (MIN_REPORT_LENGTH..=MAX_REPORT_LENGTH).contains(words))
        .ok_or_else(|| {
            AppError::out_of_range(format!(
                "report_length must be between {MIN_REPORT_LENGTH} and {MAX_REPORT_LENGTH} words"
            ))
        })
}
