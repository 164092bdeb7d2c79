// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses HTTP, storage, CORS and LLM settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{defaults, llm};
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe weather store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or bare file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        if path == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path),
            }
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(defaults::DATABASE_URL)
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Cross-origin settings for the browser frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list, or `*` for any origin
    pub allowed_origins: String,
}

/// Text-generation client settings
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Groq API key; required by the server, optional for classification-only use
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Base URL of the OpenAI-compatible API
    pub api_base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
    /// Nucleus sampling cutoff (0.0 - 1.0)
    pub top_p: f32,
    /// Timeout for a single completion request
    pub request_timeout_secs: u64,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("top_p", &self.top_p)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: llm::GROQ_API_BASE_URL.to_owned(),
            model: llm::DEFAULT_MODEL.to_owned(),
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            top_p: llm::DEFAULT_TOP_P,
            request_timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl LlmConfig {
    /// The API key, or a configuration error naming the missing variable
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `GROQ_API_KEY` is unset or blank
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ConfigMissing,
                    format!(
                        "Missing {} environment variable. Get your API key from https://console.groq.com/keys",
                        llm::GROQ_API_KEY_ENV
                    ),
                )
            })
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Weather store location
    pub database: DatabaseUrl,
    /// Directory served as the browser frontend
    pub frontend_dir: PathBuf,
    /// CORS settings
    pub cors: CorsConfig,
    /// Text-generation settings
    pub llm: LlmConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: defaults::HTTP_PORT,
            host: defaults::HOST.to_owned(),
            environment: Environment::default(),
            database: DatabaseUrl::default(),
            frontend_dir: PathBuf::from(defaults::FRONTEND_DIR),
            cors: CorsConfig {
                allowed_origins: defaults::CORS_ALLOWED_ORIGINS.to_owned(),
            },
            llm: LlmConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a numeric variable does not parse or a
    /// value falls outside its accepted range
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`Self::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
        let fallback = LlmConfig::default();

        let config = Self {
            http_port: parse_or(&lookup, "HTTP_PORT", defaults::HTTP_PORT)?,
            host: text("HOST", defaults::HOST),
            environment: Environment::from_str_or_default(&text("ENVIRONMENT", "development")),
            database: DatabaseUrl::parse_url(&text("DATABASE_URL", defaults::DATABASE_URL)),
            frontend_dir: PathBuf::from(text("FRONTEND_DIR", defaults::FRONTEND_DIR)),
            cors: CorsConfig {
                allowed_origins: text("CORS_ALLOWED_ORIGINS", defaults::CORS_ALLOWED_ORIGINS),
            },
            llm: LlmConfig {
                api_key: lookup(llm::GROQ_API_KEY_ENV).filter(|key| !key.trim().is_empty()),
                api_base_url: text("GROQ_API_BASE_URL", &fallback.api_base_url),
                model: text("GROQ_MODEL", &fallback.model),
                temperature: parse_or(&lookup, "FORECAST_TEMPERATURE", fallback.temperature)?,
                max_tokens: parse_or(&lookup, "FORECAST_MAX_TOKENS", fallback.max_tokens)?,
                top_p: parse_or(&lookup, "FORECAST_TOP_P", fallback.top_p)?,
                request_timeout_secs: parse_or(
                    &lookup,
                    "LLM_REQUEST_TIMEOUT_SECS",
                    fallback.request_timeout_secs,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` for the first out-of-range value
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(invalid(format!(
                "FORECAST_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.llm.top_p) {
            return Err(invalid(format!(
                "FORECAST_TOP_P must be between 0.0 and 1.0, got {}",
                self.llm.top_p
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(invalid("FORECAST_MAX_TOKENS must be greater than zero"));
        }
        if self.llm.request_timeout_secs == 0 {
            return Err(invalid("LLM_REQUEST_TIMEOUT_SECS must be greater than zero"));
        }
        Ok(())
    }

    /// Address the HTTP listener binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// One-line, secret-free configuration summary for startup logs
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "SkyCast configuration: environment={} bind={} database={} frontend={} cors={} model={} api_key={}",
            self.environment,
            self.bind_address(),
            self.database,
            self.frontend_dir.display(),
            self.cors.allowed_origins,
            self.llm.model,
            if self.llm.api_key.is_some() {
                "set"
            } else {
                "missing"
            }
        )
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|_| invalid(format!("{key} has an invalid value: {raw:?}")))
    })
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::new(ErrorCode::ConfigInvalid, message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/weather.db").to_connection_string(),
            "sqlite:./data/weather.db"
        );
        assert_eq!(
            DatabaseUrl::parse_url("/var/lib/skycast.db"),
            DatabaseUrl::SQLite {
                path: PathBuf::from("/var/lib/skycast.db")
            }
        );
    }

    #[test]
    fn test_environment_parsing() {
        assert_eq!(Environment::from_str_or_default("PROD"), Environment::Production);
        assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
        assert_eq!(Environment::from_str_or_default("staging"), Environment::Development);
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let config = LlmConfig {
            api_key: Some("gsk_secret_value".to_owned()),
            ..LlmConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("gsk_secret_value"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_missing_api_key_is_reported() {
        let error = LlmConfig::default().require_api_key().unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
        assert!(error.message.contains("GROQ_API_KEY"));
    }
}
