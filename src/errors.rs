// ABOUTME: Error handling re-exports from skycast-core for the server crate
// ABOUTME: Keeps `crate::errors::AppError` paths stable across modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! # Unified Error Handling
//!
//! All error types live in `skycast-core` so that the server, the CLI and
//! any future crate share one taxonomy and one JSON error body.

pub use skycast_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails,
};
