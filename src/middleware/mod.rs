// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, per-request spans and CORS configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

pub mod cors;
pub mod request_id;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and correlation
pub use request_id::{
    make_request_span, request_id_from_headers, request_tracing_layers, MakePrefixedRequestId,
    REQUEST_ID_HEADER,
};
