// ABOUTME: Re-exports command modules for skycast-cli
// ABOUTME: Provides access to forecast, warning and import commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

pub mod forecast;
pub mod import;
