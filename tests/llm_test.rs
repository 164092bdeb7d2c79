// ABOUTME: Integration tests for the Groq client against a local mock completions API
// ABOUTME: Checks request shape, auth header, SSE streaming and error status mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::StreamExt;
use serde_json::{json, Value};
use skycast_server::config::LlmConfig;
use skycast_server::errors::ErrorCode;
use skycast_server::llm::{ChatMessage, ChatRequest, GroqProvider, LlmProvider};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

const API_KEY: &str = "test-groq-key";

#[derive(Clone, Default)]
struct MockState {
    last_body: Arc<Mutex<Option<Value>>>,
    last_auth: Arc<Mutex<Option<String>>>,
}

async fn completions(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    *state.last_auth.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    *state.last_body.lock().unwrap() = Some(body.clone());

    match body["model"].as_str().unwrap_or_default() {
        "unauthorized" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Invalid API Key", "type": "invalid_request_error"}})),
        )
            .into_response(),
        "throttled" => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({"error": {"message": "Rate limit reached", "type": "tokens"}})),
        )
            .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ if body["stream"] == true => (
            [(header::CONTENT_TYPE, "text/event-stream")],
            concat!(
                "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"},\"finish_reason\":null}]}\n\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\"Sunny\"},\"finish_reason\":null}]}\n\n",
                "data: {\"choices\":[{\"delta\":{\"content\":\" skies\"},\"finish_reason\":null}]}\n\n",
                "data: {\"choices\":[{\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
                "data: [DONE]\n\n",
            ),
        )
            .into_response(),
        model => Json(json!({
            "model": model,
            "choices": [{
                "message": {"role": "assistant", "content": "Clear and calm."},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 4, "total_tokens": 124}
        }))
        .into_response(),
    }
}

async fn spawn_mock() -> (String, MockState) {
    common::init_test_logging();
    let state = MockState::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .route("/v1/models", get(|| async { Json(json!({"data": []})) }))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{address}/v1"), state)
}

fn provider(base_url: &str) -> GroqProvider {
    GroqProvider::new(API_KEY, base_url, Duration::from_secs(5)).unwrap()
}

fn forecast_request(model: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system("You are a weather forecaster."),
        ChatMessage::user("Forecast for 2024-07-14"),
    ])
    .with_model(model)
    .with_temperature(0.7)
    .with_max_tokens(1024)
    .with_top_p(0.9)
}

#[tokio::test]
async fn test_complete_sends_expected_request() {
    let (base_url, state) = spawn_mock().await;
    let groq = provider(&base_url);

    let response = groq.complete(&forecast_request("llama-test")).await.unwrap();
    assert_eq!(response.content, "Clear and calm.");
    assert_eq!(response.model, "llama-test");
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 124);

    assert_eq!(
        state.last_auth.lock().unwrap().as_deref(),
        Some("Bearer test-groq-key")
    );
    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "llama-test");
    assert_eq!(body["stream"], false);
    assert_eq!(body["max_tokens"], 1024);
    assert!((body["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["content"], "Forecast for 2024-07-14");
}

#[tokio::test]
async fn test_stream_yields_deltas_then_final_chunk() {
    let (base_url, state) = spawn_mock().await;
    let groq = provider(&base_url);

    let stream = groq
        .complete_stream(&forecast_request("llama-test").with_streaming())
        .await
        .unwrap();
    let chunks: Vec<_> = stream.map(Result::unwrap).collect().await;

    let text: String = chunks.iter().map(|chunk| chunk.delta.as_str()).collect();
    assert_eq!(text, "Sunny skies");
    assert!(chunks.last().unwrap().is_final);
    assert!(chunks.iter().all(|chunk| !chunk.delta.is_empty() || chunk.is_final));

    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["stream"], true);
}

#[tokio::test]
async fn test_error_statuses_map_to_error_codes() {
    let (base_url, _state) = spawn_mock().await;
    let groq = provider(&base_url);

    let err = groq.complete(&forecast_request("unauthorized")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalAuthFailed);
    assert!(err.message.contains("Invalid API Key"));

    let err = groq.complete(&forecast_request("throttled")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalRateLimited);

    let err = groq.complete(&forecast_request("broken")).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    assert!(err.message.contains("upstream exploded"));
}

#[tokio::test]
async fn test_health_check_and_config_defaults() {
    let (base_url, state) = spawn_mock().await;
    let config = LlmConfig {
        api_key: Some(API_KEY.to_owned()),
        api_base_url: base_url,
        model: "configured-model".to_owned(),
        ..LlmConfig::default()
    };
    let groq = GroqProvider::from_config(&config).unwrap();
    assert_eq!(groq.default_model(), "configured-model");
    assert!(groq.capabilities().supports_streaming());
    assert!(groq.health_check().await.unwrap());

    // Requests without a model use the configured one
    groq.complete(&ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap();
    let body = state.last_body.lock().unwrap().clone().unwrap();
    assert_eq!(body["model"], "configured-model");
}

#[test]
fn test_from_config_requires_api_key() {
    let err = GroqProvider::from_config(&LlmConfig::default())
        .err()
        .unwrap();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
}
