// ABOUTME: Threshold configuration error types
// ABOUTME: Raised while loading or validating cutoffs, never during classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use thiserror::Error;

/// Errors raised while building a [`crate::ThresholdConfig`]
#[derive(Debug, Error, PartialEq)]
pub enum ThresholdError {
    /// A cutoff is NaN or infinite
    #[error("threshold {name} must be a finite number, got {value}")]
    NotFinite {
        /// Configuration field name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// A severe tier is not more extreme than the tier below it
    #[error("tier ordering violated for {category}: {stricter} ({stricter_value}) must exceed {looser} ({looser_value})")]
    TierOrder {
        /// Category whose tiers are out of order
        category: &'static str,
        /// Name of the cutoff expected to be more extreme
        stricter: &'static str,
        /// Its configured value
        stricter_value: f64,
        /// Name of the cutoff expected to be less extreme
        looser: &'static str,
        /// Its configured value
        looser_value: f64,
    },

    /// An override in the environment could not be parsed
    #[error("environment variable {key} is not a number: {value:?}")]
    Parse {
        /// Environment variable name
        key: &'static str,
        /// Raw value found
        value: String,
    },
}
