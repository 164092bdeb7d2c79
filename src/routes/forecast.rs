// ABOUTME: Forecast generation and hazard warning route handlers
// ABOUTME: Validates JSON bodies and tags errors with the request correlation ID
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::errors::AppError;
use crate::forecast::{
    DailyWarnings, ForecastRequest, ForecastResponse, ForecastService, WarningsRequest,
};
use crate::middleware::request_id_from_headers;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::HeaderMap;
use serde::Serialize;
use std::sync::Arc;

/// Body of `GET /api`
#[derive(Debug, Serialize)]
pub struct ApiInfo {
    /// Usage hint
    pub message: &'static str,
}

/// Forecast routes handler
pub struct ForecastRoutes;

impl ForecastRoutes {
    /// Create all forecast routes
    pub fn routes(service: Arc<ForecastService>) -> Router {
        Router::new()
            .route("/api", get(Self::api_info))
            .route("/api/generate_forecast", post(Self::generate_forecast))
            .route("/api/warnings", post(Self::warnings))
            .with_state(service)
    }

    async fn api_info() -> Json<ApiInfo> {
        Json(ApiInfo {
            message: "API is running. You can use /api/generate_forecast for weather forecasts.",
        })
    }

    async fn generate_forecast(
        State(service): State<Arc<ForecastService>>,
        headers: HeaderMap,
        payload: Result<Json<ForecastRequest>, JsonRejection>,
    ) -> Result<Json<ForecastResponse>, AppError> {
        let Json(request) = payload.map_err(|e| Self::reject(&headers, &e))?;

        service
            .generate(&request)
            .await
            .map(Json)
            .map_err(|e| Self::tag(&headers, e))
    }

    async fn warnings(
        State(service): State<Arc<ForecastService>>,
        headers: HeaderMap,
        payload: Result<Json<WarningsRequest>, JsonRejection>,
    ) -> Result<Json<DailyWarnings>, AppError> {
        let Json(request) = payload.map_err(|e| Self::reject(&headers, &e))?;

        service
            .warnings(&request.date)
            .await
            .map(Json)
            .map_err(|e| Self::tag(&headers, e))
    }

    fn reject(headers: &HeaderMap, rejection: &JsonRejection) -> AppError {
        Self::tag(
            headers,
            AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text())),
        )
    }

    fn tag(headers: &HeaderMap, error: AppError) -> AppError {
        match request_id_from_headers(headers) {
            Some(request_id) => error.with_request_id(request_id),
            None => error,
        }
    }
}
