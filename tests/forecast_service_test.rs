// ABOUTME: Integration tests for the forecast service outside the HTTP layer
// ABOUTME: Covers streaming generation, validation order and warning lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::ScriptedLlm;
use futures_util::StreamExt;
use serde_json::json;
use skycast_hazards::{HazardCategory, Severity, ThresholdConfig};
use skycast_server::database::SqliteWeatherStore;
use skycast_server::errors::ErrorCode;
use skycast_server::forecast::{daily_warnings, ForecastRequest};
use std::sync::Arc;

async fn heatwave_store() -> Arc<SqliteWeatherStore> {
    common::create_seeded_store(&[common::record(json!({
        "date": "2024-08-02 00:00:00+00:00",
        "temperature_2m": "39.2",
        "relative_humidity_2m": 30,
        "precipitation": 0
    }))])
    .await
}

#[tokio::test]
async fn test_daily_warnings_classifies_stored_record() {
    let store = heatwave_store().await;

    let daily = daily_warnings(store.as_ref(), &ThresholdConfig::default(), "2024-08-02")
        .await
        .unwrap();
    assert_eq!(daily.date, "2024-08-02");
    assert_eq!(daily.data_used.temperature_2m, Some(39.2));

    let heat = daily
        .disaster_warnings
        .get_category(HazardCategory::Heat)
        .unwrap();
    assert_eq!(heat.severity, Severity::Severe);
    assert!(daily
        .disaster_warnings
        .get_category(HazardCategory::Drought)
        .is_some());
}

#[tokio::test]
async fn test_date_is_validated_before_length() {
    let service = common::create_test_service(
        heatwave_store().await,
        ScriptedLlm::replying("unused"),
    );

    let request = ForecastRequest {
        date: "August 2nd".to_owned(),
        style: None,
        report_length: Some(10),
    };
    let err = service.generate(&request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
}

#[tokio::test]
async fn test_stream_generation_delivers_full_text() {
    let llm = ScriptedLlm::replying("Scorching heat with no relief in sight.");
    let service = common::create_test_service(heatwave_store().await, llm.clone());

    let (daily, stream) = service
        .generate_stream(&ForecastRequest::for_date("2024-08-02"))
        .await
        .unwrap();
    assert!(!daily.disaster_warnings.is_empty());

    let text: String = stream
        .map(|chunk| chunk.unwrap().delta)
        .collect::<Vec<_>>()
        .await
        .concat();
    assert_eq!(text, "Scorching heat with no relief in sight.");

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].stream);
    assert!(requests[0].messages[1].content.contains("SEVERE: "));
}

#[tokio::test]
async fn test_missing_date_skips_llm() {
    let llm = ScriptedLlm::replying("unused");
    let service = common::create_test_service(heatwave_store().await, llm.clone());

    let err = service
        .generate(&ForecastRequest::for_date("2024-08-03"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
    assert!(llm.requests().is_empty());
}
