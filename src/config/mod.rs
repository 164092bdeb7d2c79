// ABOUTME: Configuration management module for server settings
// ABOUTME: Environment-only configuration for the HTTP server, weather store and LLM client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! Configuration module for the SkyCast server
//!
//! Everything is read from environment variables at startup. Hazard
//! thresholds are configured separately through
//! [`skycast_hazards::ThresholdConfig::from_env`].

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, DatabaseUrl, Environment, LlmConfig, ServerConfig};
