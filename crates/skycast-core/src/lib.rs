// ABOUTME: Core types and constants for the SkyCast forecast service
// ABOUTME: Foundation crate with error handling and service-wide constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![deny(unsafe_code)]

//! # SkyCast Core
//!
//! Foundation crate shared by the forecast server and its command line client.
//! It changes rarely, which keeps incremental rebuilds of the workspace cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Service constants organized by domain

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Service constants organized by domain
pub mod constants;
