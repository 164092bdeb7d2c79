// ABOUTME: Single-measurement hazard evaluation using ordered tier lists
// ABOUTME: Each category checks tiers from most to least severe and keeps the first match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::messages::Condition;
use crate::record::Observation;
use crate::severity::HazardGroup;
use crate::thresholds::{minor, ThresholdConfig};

/// How a reading is compared against a tier's cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `reading >= cutoff`
    AtLeast,
    /// `reading <= cutoff`
    AtMost,
    /// `reading < cutoff`
    Below,
    /// `reading > cutoff`
    Above,
}

impl Comparison {
    /// Whether `reading` satisfies the comparison against `cutoff`
    #[must_use]
    pub fn holds(self, reading: f64, cutoff: f64) -> bool {
        match self {
            Self::AtLeast => reading >= cutoff,
            Self::AtMost => reading <= cutoff,
            Self::Below => reading < cutoff,
            Self::Above => reading > cutoff,
        }
    }
}

/// One rung of a category's ladder
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    /// Comparison applied to the reading
    pub comparison: Comparison,
    /// Cutoff value
    pub cutoff: f64,
    /// Condition reported when the tier matches
    pub condition: fn(f64) -> Condition,
}

impl Tier {
    const fn new(comparison: Comparison, cutoff: f64, condition: fn(f64) -> Condition) -> Self {
        Self {
            comparison,
            cutoff,
            condition,
        }
    }
}

/// A hazard driven by a single reading
#[derive(Debug, Clone)]
pub struct CategoryLadder {
    /// Group the ladder fills
    pub group: HazardGroup,
    /// Extracts the reading from an observation
    pub reading: fn(&Observation) -> f64,
    /// Tiers ordered most severe first
    pub tiers: Vec<Tier>,
}

impl CategoryLadder {
    /// First tier that matches the observation, rendered as a condition
    #[must_use]
    pub fn evaluate(&self, observation: &Observation) -> Option<Condition> {
        let reading = (self.reading)(observation);
        self.tiers
            .iter()
            .find(|tier| tier.comparison.holds(reading, tier.cutoff))
            .map(|tier| (tier.condition)(reading))
    }
}

/// Ladders for every single-reading hazard, in evaluation order
#[must_use]
pub fn ladders(config: &ThresholdConfig) -> [CategoryLadder; 6] {
    use Comparison::{Above, AtLeast, AtMost, Below};

    [
        CategoryLadder {
            group: HazardGroup::FloodRain,
            reading: |obs| obs.precipitation,
            tiers: vec![
                Tier::new(AtLeast, config.flood_risk, |precipitation| {
                    Condition::SevereFlood { precipitation }
                }),
                Tier::new(AtLeast, config.heavy_rain, |precipitation| {
                    Condition::FloodWatch { precipitation }
                }),
                Tier::new(AtLeast, minor::RAINFALL_MM, |precipitation| {
                    Condition::Rainfall { precipitation }
                }),
            ],
        },
        CategoryLadder {
            group: HazardGroup::Wind,
            reading: Observation::max_wind,
            tiers: vec![
                Tier::new(AtLeast, config.severe_wind, |wind| Condition::SevereWind {
                    wind,
                }),
                Tier::new(AtLeast, config.high_wind, |wind| Condition::WindAdvisory {
                    wind,
                }),
                Tier::new(AtLeast, minor::BREEZE_KMH, |wind| Condition::Breeze { wind }),
            ],
        },
        CategoryLadder {
            group: HazardGroup::HeatCold,
            reading: |obs| obs.temperature,
            tiers: vec![
                Tier::new(AtLeast, config.extreme_heat, |temperature| {
                    Condition::ExtremeHeat { temperature }
                }),
                Tier::new(AtLeast, config.hot_weather, |temperature| {
                    Condition::HeatAdvisory { temperature }
                }),
                Tier::new(AtLeast, minor::WARM_C, |temperature| Condition::Warm {
                    temperature,
                }),
                Tier::new(AtMost, minor::COOL_C, |temperature| Condition::Cool {
                    temperature,
                }),
            ],
        },
        CategoryLadder {
            group: HazardGroup::Humidity,
            reading: |obs| obs.humidity,
            tiers: vec![
                Tier::new(AtLeast, config.high_humidity, |humidity| {
                    Condition::HighHumidity { humidity }
                }),
                Tier::new(AtLeast, minor::HUMID_PCT, |humidity| Condition::Humid {
                    humidity,
                }),
            ],
        },
        CategoryLadder {
            group: HazardGroup::Clouds,
            reading: |obs| obs.cloud_cover,
            tiers: vec![Tier::new(AtLeast, minor::OVERCAST_PCT, |cloud_cover| {
                Condition::Overcast { cloud_cover }
            })],
        },
        CategoryLadder {
            group: HazardGroup::Pressure,
            reading: |obs| obs.pressure_msl,
            tiers: vec![
                Tier::new(Below, minor::LOW_PRESSURE_HPA, |pressure| {
                    Condition::LowPressure { pressure }
                }),
                Tier::new(Above, minor::HIGH_PRESSURE_HPA, |pressure| {
                    Condition::HighPressure { pressure }
                }),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;

    fn ladder(group: HazardGroup) -> CategoryLadder {
        ladders(&ThresholdConfig::default())
            .into_iter()
            .find(|ladder| ladder.group == group)
            .unwrap()
    }

    #[test]
    fn test_comparisons_respect_boundaries() {
        assert!(Comparison::AtLeast.holds(20.0, 20.0));
        assert!(Comparison::AtMost.holds(10.0, 10.0));
        assert!(!Comparison::Below.holds(1000.0, 1000.0));
        assert!(!Comparison::Above.holds(1025.0, 1025.0));
    }

    #[test]
    fn test_first_matching_tier_wins() {
        let observation = Observation {
            precipitation: 45.0,
            ..Observation::default()
        };
        let condition = ladder(HazardGroup::FloodRain)
            .evaluate(&observation)
            .unwrap();
        assert_eq!(condition.severity(), Severity::Severe);
    }

    #[test]
    fn test_wind_uses_stronger_of_speed_and_gusts() {
        let observation = Observation {
            wind_speed_10m: 12.0,
            wind_gusts_10m: 33.0,
            ..Observation::default()
        };
        let condition = ladder(HazardGroup::Wind).evaluate(&observation).unwrap();
        assert_eq!(condition, Condition::WindAdvisory { wind: 33.0 });
    }

    #[test]
    fn test_mild_temperature_matches_nothing() {
        let observation = Observation {
            temperature: 20.0,
            ..Observation::default()
        };
        assert!(ladder(HazardGroup::HeatCold).evaluate(&observation).is_none());
    }

    #[test]
    fn test_neutral_pressure_matches_nothing() {
        let observation = Observation::default();
        assert!(ladder(HazardGroup::Pressure).evaluate(&observation).is_none());
    }
}
