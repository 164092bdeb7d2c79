// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory weather stores and a scripted LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `skycast_server`

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::stream;
use serde_json::Value;
use skycast_hazards::{ThresholdConfig, WeatherRecord};
use skycast_server::{
    config::{DatabaseUrl, LlmConfig},
    database::{SqliteWeatherStore, StoredWeather, WeatherStore},
    errors::{AppError, AppResult},
    forecast::ForecastService,
    llm::{
        ChatRequest, ChatResponse, ChatStream, LlmCapabilities, LlmProvider, StreamChunk,
    },
};
use std::env;
use std::sync::{Arc, Mutex, Once};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Build a record from loosely typed JSON
pub fn record(value: Value) -> WeatherRecord {
    WeatherRecord::from_json(&value)
}

/// In-memory store with the schema applied
pub async fn create_test_store() -> Arc<SqliteWeatherStore> {
    init_test_logging();
    let store = SqliteWeatherStore::connect(&DatabaseUrl::Memory)
        .await
        .expect("in-memory store");
    store.migrate().await.expect("migrate");
    Arc::new(store)
}

/// In-memory store seeded with the given records
pub async fn create_seeded_store(records: &[WeatherRecord]) -> Arc<SqliteWeatherStore> {
    let store = create_test_store().await;
    store.insert_many(records).await.expect("seed records");
    store
}

/// Store whose every query fails as if the database were down
pub struct UnavailableStore;

#[async_trait]
impl WeatherStore for UnavailableStore {
    async fn find_by_date(&self, _date: NaiveDate) -> AppResult<Option<StoredWeather>> {
        Err(AppError::unavailable("Database connection is not available"))
    }

    async fn sample_dates(&self, _limit: i64) -> AppResult<Vec<String>> {
        Err(AppError::unavailable("Database connection is not available"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::unavailable("Database connection is not available"))
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

/// LLM provider that replies with a fixed script and records every request
pub struct ScriptedLlm {
    reply: Result<String, String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedLlm {
    /// Provider that always answers with `reply`
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Provider that always fails with an upstream error
    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(message.to_owned()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record_request(&self, request: &ChatRequest) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .map_err(|message| AppError::external_service("Scripted", message))
    }
}

#[async_trait]
impl LlmProvider for ScriptedLlm {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::STREAMING | LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let content = self.record_request(request)?;
        Ok(ChatResponse {
            content,
            model: request.model.clone().unwrap_or_default(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }

    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        let content = self.record_request(request)?;
        let mut chunks: Vec<Result<StreamChunk, AppError>> = content
            .split_inclusive(' ')
            .map(|word| {
                Ok(StreamChunk {
                    delta: word.to_owned(),
                    is_final: false,
                    finish_reason: None,
                })
            })
            .collect();
        chunks.push(Ok(StreamChunk::done()));
        Ok(Box::pin(stream::iter(chunks)))
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        Ok(true)
    }
}

/// Forecast service over the given store and LLM with default thresholds
pub fn create_test_service(
    store: Arc<dyn WeatherStore>,
    llm: Arc<dyn LlmProvider>,
) -> Arc<ForecastService> {
    init_test_logging();
    Arc::new(ForecastService::new(
        store,
        llm,
        Arc::new(ThresholdConfig::default()),
        LlmConfig::default(),
    ))
}
