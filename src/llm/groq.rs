// ABOUTME: Groq chat completion client implementing the LlmProvider trait
// ABOUTME: Speaks the OpenAI-compatible API with blocking and SSE streaming modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # Groq Provider
//!
//! Forecast prose is generated by Groq's OpenAI-compatible chat completions
//! endpoint. The API key comes from `GROQ_API_KEY`; the base URL can be
//! overridden with `GROQ_API_BASE_URL`, which tests use to point the client
//! at a local mock.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::sse_parser::create_sse_stream;
use super::{
    ChatMessage, ChatRequest, ChatResponse, ChatStream, LlmCapabilities, LlmProvider, StreamChunk,
    TokenUsage,
};
use crate::config::LlmConfig;
use crate::constants::llm::DEFAULT_MODEL;
use crate::errors::{AppError, AppResult};

const PROVIDER_NAME: &str = "Groq";

// ============================================================================
// API Request/Response Types (OpenAI-compatible format)
// ============================================================================

#[derive(Debug, Serialize)]
struct GroqRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GroqMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ChatMessage> for GroqMessage<'a> {
    fn from(msg: &'a ChatMessage) -> Self {
        Self {
            role: msg.role.as_str(),
            content: &msg.content,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GroqResponse {
    choices: Vec<GroqChoice>,
    #[serde(default)]
    usage: Option<GroqUsage>,
    model: String,
}

#[derive(Debug, Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqUsage {
    #[serde(rename = "prompt_tokens")]
    prompt: u32,
    #[serde(rename = "completion_tokens")]
    completion: u32,
    #[serde(rename = "total_tokens")]
    total: u32,
}

#[derive(Debug, Deserialize)]
struct GroqStreamChunk {
    choices: Vec<GroqStreamChoice>,
}

#[derive(Debug, Deserialize)]
struct GroqStreamChoice {
    delta: GroqDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqDelta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqErrorResponse {
    error: GroqErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GroqErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Groq chat completion client
pub struct GroqProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GroqProvider {
    /// Create a provider against `base_url` with a per-request timeout
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
        })
    }

    /// Create a provider from the LLM section of the server configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when no API key is configured
    pub fn from_config(config: &LlmConfig) -> AppResult<Self> {
        let api_key = config.require_api_key()?;
        let mut provider = Self::new(
            api_key,
            config.api_base_url.as_str(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        provider.default_model.clone_from(&config.model);
        Ok(provider)
    }

    fn api_url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url)
    }

    fn build_request<'a>(&'a self, request: &'a ChatRequest, stream: bool) -> GroqRequest<'a> {
        GroqRequest {
            model: request.model.as_deref().unwrap_or(&self.default_model),
            messages: request.messages.iter().map(GroqMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            stream,
        }
    }

    async fn send(&self, body: &GroqRequest<'_>) -> AppResult<reqwest::Response> {
        let response = self
            .client
            .post(self.api_url("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                error!("Failed to send request to Groq API: {e}");
                AppError::external_service(PROVIDER_NAME, format!("Failed to connect: {e}"))
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::parse_error_response(status, &body))
    }

    /// Map a non-success response to the matching error code
    fn parse_error_response(status: StatusCode, body: &str) -> AppError {
        let detail = serde_json::from_str::<GroqErrorResponse>(body).map_or_else(
            |_| format!("API error ({status}): {}", body.chars().take(200).collect::<String>()),
            |parsed| {
                let error_type = parsed.error.error_type.unwrap_or_else(|| "unknown".to_owned());
                format!("{error_type} - {}", parsed.error.message)
            },
        );

        match status {
            StatusCode::UNAUTHORIZED => AppError::external_auth_failed(PROVIDER_NAME, detail),
            StatusCode::TOO_MANY_REQUESTS => {
                AppError::external_rate_limited(PROVIDER_NAME, detail)
            }
            _ => AppError::external_service(PROVIDER_NAME, detail),
        }
    }

    fn parse_stream_payload(payload: &str) -> Option<Result<StreamChunk, AppError>> {
        match serde_json::from_str::<GroqStreamChunk>(payload) {
            Ok(chunk) => chunk.choices.into_iter().next().map(|choice| {
                Ok(StreamChunk {
                    delta: choice.delta.content.unwrap_or_default(),
                    is_final: choice.finish_reason.is_some(),
                    finish_reason: choice.finish_reason,
                })
            }),
            Err(e) => {
                warn!("Failed to parse Groq stream chunk: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &'static str {
        "groq"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::STREAMING | LlmCapabilities::SYSTEM_MESSAGES | LlmCapabilities::TOP_P
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        debug!("Sending chat completion request to Groq");

        let response = self.send(&self.build_request(request, false)).await?;
        let groq_response: GroqResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Groq API response: {e}");
            AppError::external_service(PROVIDER_NAME, format!("Failed to parse response: {e}"))
        })?;

        let choice = groq_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service(PROVIDER_NAME, "API returned no choices"))?;

        let content = choice.message.content.unwrap_or_default();
        debug!(
            chars = content.len(),
            finish_reason = ?choice.finish_reason,
            "Received response from Groq"
        );

        Ok(ChatResponse {
            content,
            model: groq_response.model,
            usage: groq_response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt,
                completion_tokens: u.completion,
                total_tokens: u.total,
            }),
            finish_reason: choice.finish_reason,
        })
    }

    #[instrument(skip(self, request), fields(model = %request.model.as_deref().unwrap_or(&self.default_model)))]
    async fn complete_stream(&self, request: &ChatRequest) -> Result<ChatStream, AppError> {
        debug!("Sending streaming chat completion request to Groq");

        let response = self.send(&self.build_request(request, true)).await?;
        Ok(create_sse_stream(
            response.bytes_stream(),
            Self::parse_stream_payload,
            PROVIDER_NAME,
        ))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, AppError> {
        let response = self
            .client
            .get(self.api_url("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(PROVIDER_NAME, format!("Health check failed: {e}"))
            })?;

        let healthy = response.status().is_success();
        if !healthy {
            warn!(status = %response.status(), "Groq API health check failed");
        }
        Ok(healthy)
    }
}
