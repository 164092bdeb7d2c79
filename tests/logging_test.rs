// ABOUTME: Tests for logging configuration read from the environment
// ABOUTME: Checks format selection, production defaults and the CLI profile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use serial_test::serial;
use skycast_server::logging::{LogFormat, LoggingConfig};
use std::env;

fn clear_logging_env() {
    for key in [
        "RUST_LOG",
        "LOG_FORMAT",
        "ENVIRONMENT",
        "SERVICE_NAME",
        "LOG_INCLUDE_LOCATION",
        "LOG_INCLUDE_THREAD",
        "LOG_INCLUDE_SPANS",
    ] {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    clear_logging_env();
    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "skycast-edge");

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert_eq!(config.service_name, "skycast-edge");
    assert!(config.include_location);
    assert!(config.include_thread);
    assert!(!config.include_spans);

    clear_logging_env();
}

#[test]
#[serial]
fn test_development_defaults() {
    clear_logging_env();

    let config = LoggingConfig::from_env();

    assert_eq!(config.level, "info");
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.environment, "development");
    assert!(!config.include_location);
    assert!(!config.include_thread);
}

#[test]
#[serial]
fn test_unknown_format_falls_back_to_pretty() {
    clear_logging_env();
    env::set_var("LOG_FORMAT", "xml");
    env::set_var("LOG_INCLUDE_SPANS", "1");

    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Pretty);
    assert!(config.include_spans);

    clear_logging_env();
}

#[test]
#[serial]
fn test_cli_profile_is_quiet() {
    clear_logging_env();

    let config = LoggingConfig::for_cli();
    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
}
