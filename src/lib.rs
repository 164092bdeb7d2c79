// ABOUTME: Main library entry point for the SkyCast forecast service
// ABOUTME: Wires the weather store, hazard engine, LLM client and HTTP routes together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![deny(unsafe_code)]

//! # SkyCast Server
//!
//! Date-based weather forecasts. For a requested calendar date the service
//! looks up the stored observation, classifies it into disaster warnings with
//! the [`skycast_hazards`] engine, and asks a language model to write a
//! forecast of the requested length and style that quotes those warnings.
//!
//! ## Architecture
//!
//! - **Database**: `WeatherStore` trait with a `SQLite` implementation
//! - **Forecast**: prompt construction and the request pipeline
//! - **LLM**: provider trait and the Groq client
//! - **Routes**: axum HTTP API and static frontend
//! - **Config**: environment-only configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use skycast_server::config::environment::ServerConfig;
//! use skycast_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("SkyCast configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Service-wide constants
pub mod constants;

/// Weather observation storage
pub mod database;

/// Unified error handling
pub mod errors;

/// Forecast prompt construction and generation pipeline
pub mod forecast;

/// Language model provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// HTTP routes
pub mod routes;
