// ABOUTME: Health check route reporting service and weather store status
// ABOUTME: Used by load balancers and the frontend to detect a missing database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::forecast::ForecastService;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

/// Body of `GET /health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests
    pub status: &'static str,
    /// `connected` or `disconnected`
    pub database: &'static str,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(service: Arc<ForecastService>) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .with_state(service)
    }

    async fn health(State(service): State<Arc<ForecastService>>) -> Json<HealthResponse> {
        let database = if service.store_connected().await {
            "connected"
        } else {
            "disconnected"
        };

        Json(HealthResponse {
            status: "healthy",
            database,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
