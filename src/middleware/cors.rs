// ABOUTME: CORS middleware configuration for the forecast API
// ABOUTME: Lets the browser frontend call the API from another origin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::config::ServerConfig;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` (or an empty value) allows any origin. Otherwise the value is a
/// comma-separated origin list; entries that are not valid header values are
/// skipped, and if none survive any origin is allowed.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://weather.example.com,http://localhost:3000"
/// ```
pub fn setup_cors(config: &ServerConfig) -> CorsLayer {
    let configured = config.cors.allowed_origins.trim();

    let allow_origin = if configured.is_empty() || configured == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = configured
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .expose_headers([HeaderName::from_static("x-request-id")])
}
