// ABOUTME: Hazards that need several readings at once: cyclone/storm and drought
// ABOUTME: Combined warnings add to the per-category wind and rain warnings, never replace them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::messages::Condition;
use crate::record::Observation;
use crate::thresholds::{storm, ThresholdConfig};

/// Cyclone when wind and rain both reach the severe cutoffs, otherwise storm if
/// both reach the storm cutoffs
#[must_use]
pub fn detect_cyclone_or_storm(
    observation: &Observation,
    config: &ThresholdConfig,
) -> Option<Condition> {
    let wind = observation.max_wind();
    let precipitation = observation.precipitation;

    if wind >= config.cyclone_risk && precipitation >= config.heavy_rain {
        Some(Condition::Cyclone {
            wind,
            precipitation,
        })
    } else if wind >= storm::WIND_KMH && precipitation >= storm::PRECIPITATION_MM {
        Some(Condition::Storm {
            wind,
            precipitation,
        })
    } else {
        None
    }
}

/// Drought when it is hot, dry and essentially rainless at the same time
#[must_use]
pub fn detect_drought(observation: &Observation, config: &ThresholdConfig) -> Option<Condition> {
    let limits = &config.drought_risk;
    let hot = observation.temperature >= limits.max_temp;
    let dry = observation.humidity <= limits.max_humidity;
    let rainless = observation.precipitation <= limits.max_precipitation;

    (hot && dry && rainless).then_some(Condition::Drought {
        temperature: observation.temperature,
        humidity: observation.humidity,
    })
}
