// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants shared by the server, CLI and tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Service identity used in logs and health responses
pub mod service_names {
    /// Name reported by the HTTP server
    pub const SKYCAST_SERVER: &str = "skycast-server";
    /// Name reported by the command line client
    pub const SKYCAST_CLI: &str = "skycast-cli";
}

/// Default values for environment-driven configuration
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 8000;
    /// Default bind address
    pub const HOST: &str = "0.0.0.0";
    /// Default weather store location
    pub const DATABASE_URL: &str = "sqlite:./data/weather.db";
    /// Default directory holding the browser frontend
    pub const FRONTEND_DIR: &str = "./frontend";
    /// Default CORS origin list
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
}

/// Forecast request limits and defaults
pub mod forecast {
    /// Words requested from the model when the caller does not say
    pub const DEFAULT_REPORT_LENGTH: u32 = 200;
    /// Shortest forecast a caller may request
    pub const MIN_REPORT_LENGTH: u32 = 50;
    /// Longest forecast a caller may request
    pub const MAX_REPORT_LENGTH: u32 = 1000;
    /// Calendar date format accepted by the API
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Text-generation service defaults
pub mod llm {
    /// Environment variable holding the Groq API key
    pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";
    /// OpenAI-compatible endpoint served by Groq
    pub const GROQ_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
    /// Model used for forecasts
    pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    /// Completion token cap
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    /// Nucleus sampling cutoff
    pub const DEFAULT_TOP_P: f32 = 0.9;
    /// Request timeout for the completion call
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
}

/// Weather store layout
pub mod storage {
    /// Table holding one row per observation day
    pub const WEATHER_TABLE: &str = "weather_observations";
    /// Number of stored dates logged when a lookup misses
    pub const MISS_SAMPLE_SIZE: i64 = 5;
}
