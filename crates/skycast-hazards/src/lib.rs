// ABOUTME: Disaster-warning classification engine for daily weather observations
// ABOUTME: Normalizes records, evaluates threshold tiers, and aggregates ordered warnings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![deny(unsafe_code)]

//! # SkyCast Hazards
//!
//! Pure, synchronous classification of a single day's weather into a set of
//! hazard warnings. The engine holds no I/O handles: callers pass the record
//! and the [`ThresholdConfig`] in, and get a [`WarningSet`] back.
//!
//! ```rust
//! use serde_json::json;
//! use skycast_hazards::{classify, ThresholdConfig, WeatherRecord};
//!
//! let record = WeatherRecord::from_json(&json!({ "precipitation": 45.0 }));
//! let warnings = classify(&record, &ThresholdConfig::default());
//! assert_eq!(warnings.keys().next(), Some("flood"));
//! ```

/// Combined-condition detectors (cyclone/storm, drought)
pub mod combined;
/// Classification entry points
pub mod engine;
/// Threshold configuration errors
pub mod error;
/// Per-category tier ladders
pub mod evaluator;
/// Warning message rendering
pub mod messages;
/// Weather record input and normalization
pub mod record;
/// Severity and hazard category identifiers
pub mod severity;
/// Threshold configuration
pub mod thresholds;
/// Warning and warning set types
pub mod warning;

pub use engine::{classify, classify_observation};
pub use error::ThresholdError;
pub use messages::Condition;
pub use record::{Observation, WeatherRecord};
pub use severity::{HazardCategory, HazardGroup, Severity};
pub use thresholds::{DroughtThresholds, ThresholdConfig};
pub use warning::{GroupOccupied, Warning, WarningSet};
