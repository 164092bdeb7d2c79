// ABOUTME: Entry points that turn a weather record into an ordered warning set
// ABOUTME: Runs single-reading ladders and combined detectors in the fixed group order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::combined::{detect_cyclone_or_storm, detect_drought};
use crate::evaluator::ladders;
use crate::messages::Condition;
use crate::record::{Observation, WeatherRecord};
use crate::severity::HazardGroup;
use crate::thresholds::ThresholdConfig;
use crate::warning::{Warning, WarningSet};
use tracing::{debug, instrument};

/// Classify a raw weather record
///
/// Never fails. A record with nothing noteworthy yields an empty set.
#[must_use]
#[instrument(level = "debug", skip_all, fields(date = record.date.as_deref().unwrap_or("unknown")))]
pub fn classify(record: &WeatherRecord, config: &ThresholdConfig) -> WarningSet {
    classify_observation(&record.normalize(), config)
}

/// Classify an already normalized observation
#[must_use]
pub fn classify_observation(observation: &Observation, config: &ThresholdConfig) -> WarningSet {
    let single = ladders(config);
    let mut warnings = WarningSet::new();

    for group in HazardGroup::EVALUATION_ORDER {
        let condition = match group {
            HazardGroup::CycloneStorm => detect_cyclone_or_storm(observation, config),
            HazardGroup::Drought => detect_drought(observation, config),
            _ => single
                .iter()
                .find(|ladder| ladder.group == group)
                .and_then(|ladder| ladder.evaluate(observation)),
        };

        if let Some(condition) = condition {
            record_condition(&mut warnings, &condition);
        }
    }

    debug!(
        count = warnings.len(),
        highest = ?warnings.highest_severity(),
        "classified observation"
    );
    warnings
}

fn record_condition(warnings: &mut WarningSet, condition: &Condition) {
    if let Err(occupied) = warnings.insert(Warning::from_condition(condition)) {
        // Each group is evaluated once, so this only fires on a broken ladder table
        debug!(group = ?occupied.group, "dropping duplicate hazard warning");
    }
}
