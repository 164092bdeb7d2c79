// ABOUTME: Route module organization and router assembly for the forecast API
// ABOUTME: Combines API routes, static frontend serving and the middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! HTTP routes for SkyCast
//!
//! Each domain module holds route definitions and thin handlers that delegate
//! to [`ForecastService`]. Anything not matched by an API route is served from
//! the frontend directory.

/// Forecast and warning routes
pub mod forecast;
/// Health check routes
pub mod health;

pub use forecast::ForecastRoutes;
pub use health::HealthRoutes;

use crate::config::ServerConfig;
use crate::forecast::ForecastService;
use crate::middleware::{make_request_span, request_tracing_layers, setup_cors};
use axum::body::Body;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Headroom on top of the LLM timeout before a request is abandoned
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Build the complete application router
pub fn build_router(service: Arc<ForecastService>, config: &ServerConfig) -> Router {
    let (set_request_id, propagate_request_id) = request_tracing_layers();
    let frontend = ServeDir::new(&config.frontend_dir).append_index_html_on_directories(true);
    let request_timeout = Duration::from_secs(
        config
            .llm
            .request_timeout_secs
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS),
    );

    Router::new()
        .merge(ForecastRoutes::routes(Arc::clone(&service)))
        .merge(HealthRoutes::routes(service))
        .fallback_service(frontend)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(setup_cors(config))
        .layer(propagate_request_id)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(set_request_id)
}
