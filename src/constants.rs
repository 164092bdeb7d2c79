// ABOUTME: Constants re-exported from skycast-core
// ABOUTME: Service names, configuration defaults, forecast limits and storage layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

pub use skycast_core::constants::{defaults, forecast, llm, service_names, storage};
