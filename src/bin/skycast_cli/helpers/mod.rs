// ABOUTME: Re-exports helper modules for skycast-cli
// ABOUTME: Provides access to terminal display formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

pub mod display;
