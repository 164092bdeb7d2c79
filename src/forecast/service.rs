// ABOUTME: Forecast pipeline combining store lookup, hazard classification and LLM generation
// ABOUTME: Maps each failure stage to the HTTP-facing error the caller sees
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use super::prompt::{build_prompt, system_message};
use super::{
    parse_date, validate_report_length, DailyWarnings, ForecastRequest, ForecastResponse,
    ForecastStyle,
};
use crate::config::LlmConfig;
use crate::database::WeatherStore;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::llm::{ChatMessage, ChatRequest, ChatStream, LlmProvider};
use skycast_hazards::{classify, ThresholdConfig};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Look up a date and classify its hazards
///
/// # Errors
///
/// - `InvalidFormat` when the date is not `YYYY-MM-DD`
/// - `ResourceUnavailable` when the store cannot be queried
/// - `ResourceNotFound` when no observation exists for the date
pub async fn daily_warnings(
    store: &dyn WeatherStore,
    thresholds: &ThresholdConfig,
    date: &str,
) -> AppResult<DailyWarnings> {
    let day = parse_date(date)?;

    let stored = store.find_by_date(day).await?.ok_or_else(|| {
        AppError::new(
            ErrorCode::ResourceNotFound,
            format!("No weather data found for {day}. Please try a different date."),
        )
    })?;

    let disaster_warnings = classify(&stored.record, thresholds);
    info!(
        date = %day,
        stored_date = %stored.stored_date,
        warnings = disaster_warnings.len(),
        "Classified weather hazards"
    );

    Ok(DailyWarnings {
        date: date.to_owned(),
        data_used: stored.record,
        disaster_warnings,
    })
}

/// Shared forecast pipeline used by the HTTP handlers and the CLI
#[derive(Clone)]
pub struct ForecastService {
    store: Arc<dyn WeatherStore>,
    llm: Arc<dyn LlmProvider>,
    thresholds: Arc<ThresholdConfig>,
    llm_config: LlmConfig,
}

impl ForecastService {
    /// Create a service over a store, an LLM client and hazard thresholds
    #[must_use]
    pub fn new(
        store: Arc<dyn WeatherStore>,
        llm: Arc<dyn LlmProvider>,
        thresholds: Arc<ThresholdConfig>,
        llm_config: LlmConfig,
    ) -> Self {
        Self {
            store,
            llm,
            thresholds,
            llm_config,
        }
    }

    /// Weather store backing the service
    #[must_use]
    pub fn store(&self) -> &dyn WeatherStore {
        self.store.as_ref()
    }

    /// True when the store answers a ping
    pub async fn store_connected(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    /// Classify the hazards for a date without calling the LLM
    ///
    /// # Errors
    ///
    /// See [`daily_warnings`]
    pub async fn warnings(&self, date: &str) -> AppResult<DailyWarnings> {
        daily_warnings(self.store.as_ref(), &self.thresholds, date).await
    }

    /// Generate a forecast for the requested date
    ///
    /// # Errors
    ///
    /// Everything [`daily_warnings`] returns, plus `ValueOutOfRange` for a bad
    /// report length and `ExternalServiceError` when the LLM call fails
    #[instrument(skip(self, request), fields(date = %request.date))]
    pub async fn generate(&self, request: &ForecastRequest) -> AppResult<ForecastResponse> {
        let (daily, chat) = self.prepare(request).await?;

        info!(provider = self.llm.name(), "Sending forecast prompt to LLM");
        let response = self.llm.complete(&chat).await.map_err(llm_failure)?;
        info!(
            chars = response.content.len(),
            "Received forecast from LLM"
        );

        Ok(ForecastResponse {
            date: daily.date,
            forecast: response.content,
            data_used: daily.data_used,
            disaster_warnings: daily.disaster_warnings,
        })
    }

    /// Generate a forecast as a stream of text chunks
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`]; errors inside the stream are yielded as items
    pub async fn generate_stream(
        &self,
        request: &ForecastRequest,
    ) -> AppResult<(DailyWarnings, ChatStream)> {
        let (daily, chat) = self.prepare(request).await?;
        let stream = self
            .llm
            .complete_stream(&chat.with_streaming())
            .await
            .map_err(llm_failure)?;
        Ok((daily, stream))
    }

    async fn prepare(&self, request: &ForecastRequest) -> AppResult<(DailyWarnings, ChatRequest)> {
        // Date errors take precedence over length errors
        parse_date(&request.date)?;
        let report_length = validate_report_length(request.report_length)?;
        let style = ForecastStyle::parse(request.style.as_deref());

        let daily = self.warnings(&request.date).await?;
        let prompt = build_prompt(
            request.date.trim(),
            style,
            report_length,
            &daily.data_used,
            &daily.disaster_warnings,
        );

        let chat = ChatRequest::new(vec![
            ChatMessage::system(system_message(report_length)),
            ChatMessage::user(prompt),
        ])
        .with_model(self.llm_config.model.as_str())
        .with_temperature(self.llm_config.temperature)
        .with_max_tokens(self.llm_config.max_tokens)
        .with_top_p(self.llm_config.top_p);

        Ok((daily, chat))
    }
}

fn llm_failure(err: AppError) -> AppError {
    error!(code = ?err.code, "Error from LLM provider: {}", err.message);
    AppError::new(
        ErrorCode::ExternalServiceError,
        format!("Error from language model service: {}", err.message),
    )
    .with_source(err)
}
