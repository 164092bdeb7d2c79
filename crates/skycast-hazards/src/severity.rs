// ABOUTME: Severity ranking and hazard category identifiers for weather warnings
// ABOUTME: Defines the ordered severity scale, the eight hazard groups, and their category keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Warning severity, ordered so that `Severe > Moderate > Minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, conditions worth mentioning
    Minor,
    /// Advisory or watch level
    Moderate,
    /// Warning level
    Severe,
}

impl Severity {
    /// Lowercase label used on the wire (`"severe"`, `"moderate"`, `"minor"`)
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Uppercase label used when rendering warnings for people
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Minor => "MINOR",
            Self::Moderate => "MODERATE",
            Self::Severe => "SEVERE",
        }
    }

    /// Numeric rank (minor = 1, severe = 3)
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Minor => 1,
            Self::Moderate => 2,
            Self::Severe => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent hazard bucket; a warning set holds at most one warning per group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardGroup {
    /// Precipitation driven flooding or rain
    FloodRain,
    /// Sustained wind or gusts
    Wind,
    /// Temperature extremes in either direction
    HeatCold,
    /// Relative humidity
    Humidity,
    /// Wind combined with rain
    CycloneStorm,
    /// Heat combined with dry air and no rain
    Drought,
    /// Cloud cover
    Clouds,
    /// Mean sea level pressure
    Pressure,
}

impl HazardGroup {
    /// Groups in aggregation order
    pub const EVALUATION_ORDER: [Self; 8] = [
        Self::FloodRain,
        Self::Wind,
        Self::HeatCold,
        Self::Humidity,
        Self::CycloneStorm,
        Self::Drought,
        Self::Clouds,
        Self::Pressure,
    ];

    /// Position of the group in [`Self::EVALUATION_ORDER`]
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::FloodRain => 0,
            Self::Wind => 1,
            Self::HeatCold => 2,
            Self::Humidity => 3,
            Self::CycloneStorm => 4,
            Self::Drought => 5,
            Self::Clouds => 6,
            Self::Pressure => 7,
        }
    }
}

/// Category key carried by an individual warning
///
/// Some groups emit different keys depending on the tier that matched, e.g.
/// the flood/rain group reports `flood` for severe and moderate matches but
/// `rain` for the minor one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardCategory {
    /// Heavy or extreme precipitation
    Flood,
    /// Noticeable but non-flooding rainfall
    Rain,
    /// Wind speed or gusts
    Wind,
    /// High temperature
    Heat,
    /// Low temperature
    Cold,
    /// High relative humidity
    Humidity,
    /// Very high wind with heavy rain
    Cyclone,
    /// Strong wind with rain
    Storm,
    /// Hot, dry and rainless
    Drought,
    /// Overcast sky
    Clouds,
    /// Unusually low or high pressure
    Pressure,
}

impl HazardCategory {
    /// Wire key used in the warnings mapping
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Rain => "rain",
            Self::Wind => "wind",
            Self::Heat => "heat",
            Self::Cold => "cold",
            Self::Humidity => "humidity",
            Self::Cyclone => "cyclone",
            Self::Storm => "storm",
            Self::Drought => "drought",
            Self::Clouds => "clouds",
            Self::Pressure => "pressure",
        }
    }

    /// Group this category belongs to
    #[must_use]
    pub const fn group(&self) -> HazardGroup {
        match self {
            Self::Flood | Self::Rain => HazardGroup::FloodRain,
            Self::Wind => HazardGroup::Wind,
            Self::Heat | Self::Cold => HazardGroup::HeatCold,
            Self::Humidity => HazardGroup::Humidity,
            Self::Cyclone | Self::Storm => HazardGroup::CycloneStorm,
            Self::Drought => HazardGroup::Drought,
            Self::Clouds => HazardGroup::Clouds,
            Self::Pressure => HazardGroup::Pressure,
        }
    }
}

impl fmt::Display for HazardCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Severe > Severity::Moderate);
        assert!(Severity::Moderate > Severity::Minor);
        assert_eq!(Severity::Severe.rank(), 3);
    }

    #[test]
    fn test_group_positions_match_evaluation_order() {
        for (index, group) in HazardGroup::EVALUATION_ORDER.iter().enumerate() {
            assert_eq!(group.position(), index);
        }
    }

    #[test]
    fn test_category_keys_and_groups() {
        assert_eq!(HazardCategory::Flood.key(), "flood");
        assert_eq!(HazardCategory::Cold.to_string(), "cold");
        assert_eq!(HazardCategory::Rain.group(), HazardCategory::Flood.group());
        assert_eq!(HazardCategory::Storm.group(), HazardGroup::CycloneStorm);
        assert_ne!(HazardCategory::Heat.group(), HazardCategory::Humidity.group());
    }
}
