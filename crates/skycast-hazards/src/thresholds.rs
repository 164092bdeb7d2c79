// ABOUTME: Hazard threshold configuration with defaults, environment overrides and validation
// ABOUTME: Holds the named cutoffs plus the fixed minor-tier constants used by the evaluator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! Hazard Threshold Configuration
//!
//! Named cutoffs are configurable; the minor-tier cutoffs in [`minor`] and the
//! storm/pressure/cloud constants are fixed. [`ThresholdConfig::validate`]
//! keeps every category's tiers strictly ordered so that evaluating them
//! top-down yields the most severe match.

use crate::error::ThresholdError;
use serde::{Deserialize, Serialize};
use std::env;

/// Fixed cutoffs for the informal lower tiers
pub mod minor {
    /// Precipitation worth a rain notice (mm)
    pub const RAINFALL_MM: f64 = 10.0;
    /// Wind considered breezy (km/h)
    pub const BREEZE_KMH: f64 = 20.0;
    /// Temperature considered warm (°C)
    pub const WARM_C: f64 = 30.0;
    /// Temperature considered cool (°C), inclusive upper bound
    pub const COOL_C: f64 = 10.0;
    /// Relative humidity considered uncomfortable (%)
    pub const HUMID_PCT: f64 = 70.0;
    /// Cloud cover considered overcast (%)
    pub const OVERCAST_PCT: f64 = 80.0;
    /// Pressure below which a low pressure system is reported (hPa), exclusive
    pub const LOW_PRESSURE_HPA: f64 = 1000.0;
    /// Pressure above which a high pressure system is reported (hPa), exclusive
    pub const HIGH_PRESSURE_HPA: f64 = 1025.0;
}

/// Fixed cutoffs for the moderate storm combination
pub mod storm {
    /// Wind needed for storm conditions (km/h)
    pub const WIND_KMH: f64 = 40.0;
    /// Precipitation needed for storm conditions (mm)
    pub const PRECIPITATION_MM: f64 = 15.0;
}

/// Compound drought cutoff: all three conditions must hold at once
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroughtThresholds {
    /// Temperature at or above which drought is possible (°C)
    pub max_temp: f64,
    /// Humidity at or below which drought is possible (%)
    pub max_humidity: f64,
    /// Precipitation at or below which drought is possible (mm)
    pub max_precipitation: f64,
}

impl Default for DroughtThresholds {
    fn default() -> Self {
        Self {
            max_temp: 33.0,
            max_humidity: 40.0,
            max_precipitation: 1.0,
        }
    }
}

/// Named hazard cutoffs, read-only once the process has started
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Precipitation for a flood watch (mm)
    pub heavy_rain: f64,
    /// Precipitation for a severe flood risk (mm)
    pub flood_risk: f64,
    /// Wind for a severe wind warning (km/h)
    pub severe_wind: f64,
    /// Wind for a wind advisory (km/h)
    pub high_wind: f64,
    /// Temperature for an extreme heat warning (°C)
    pub extreme_heat: f64,
    /// Temperature for a heat advisory (°C)
    pub hot_weather: f64,
    /// Humidity for a high humidity notice (%)
    pub high_humidity: f64,
    /// Wind that, combined with heavy rain, signals a cyclone (km/h)
    pub cyclone_risk: f64,
    /// Compound drought cutoff
    pub drought_risk: DroughtThresholds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            heavy_rain: 20.0,
            flood_risk: 40.0,
            severe_wind: 50.0,
            high_wind: 30.0,
            extreme_heat: 38.0,
            hot_weather: 34.0,
            high_humidity: 80.0,
            cyclone_risk: 70.0,
            drought_risk: DroughtThresholds::default(),
        }
    }
}

impl ThresholdConfig {
    /// Load thresholds from `HAZARD_*` environment variables over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an override does not parse or the result fails
    /// [`Self::validate`]
    pub fn from_env() -> Result<Self, ThresholdError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load thresholds using an arbitrary key lookup over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a value does not parse or validation fails
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ThresholdError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str, fallback: f64| -> Result<f64, ThresholdError> {
            match lookup(key) {
                Some(raw) => raw.trim().parse::<f64>().map_err(|_| ThresholdError::Parse {
                    key,
                    value: raw,
                }),
                None => Ok(fallback),
            }
        };

        let defaults = Self::default();
        let config = Self {
            heavy_rain: read("HAZARD_HEAVY_RAIN_MM", defaults.heavy_rain)?,
            flood_risk: read("HAZARD_FLOOD_RISK_MM", defaults.flood_risk)?,
            severe_wind: read("HAZARD_SEVERE_WIND_KMH", defaults.severe_wind)?,
            high_wind: read("HAZARD_HIGH_WIND_KMH", defaults.high_wind)?,
            extreme_heat: read("HAZARD_EXTREME_HEAT_C", defaults.extreme_heat)?,
            hot_weather: read("HAZARD_HOT_WEATHER_C", defaults.hot_weather)?,
            high_humidity: read("HAZARD_HIGH_HUMIDITY_PCT", defaults.high_humidity)?,
            cyclone_risk: read("HAZARD_CYCLONE_RISK_KMH", defaults.cyclone_risk)?,
            drought_risk: DroughtThresholds {
                max_temp: read("HAZARD_DROUGHT_MAX_TEMP_C", defaults.drought_risk.max_temp)?,
                max_humidity: read(
                    "HAZARD_DROUGHT_MAX_HUMIDITY_PCT",
                    defaults.drought_risk.max_humidity,
                )?,
                max_precipitation: read(
                    "HAZARD_DROUGHT_MAX_PRECIP_MM",
                    defaults.drought_risk.max_precipitation,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every cutoff is finite and each category's tiers are ordered
    ///
    /// # Errors
    ///
    /// Returns the first violation found
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let named = [
            ("heavy_rain", self.heavy_rain),
            ("flood_risk", self.flood_risk),
            ("severe_wind", self.severe_wind),
            ("high_wind", self.high_wind),
            ("extreme_heat", self.extreme_heat),
            ("hot_weather", self.hot_weather),
            ("high_humidity", self.high_humidity),
            ("cyclone_risk", self.cyclone_risk),
            ("drought_risk.max_temp", self.drought_risk.max_temp),
            ("drought_risk.max_humidity", self.drought_risk.max_humidity),
            ("drought_risk.max_precipitation", self.drought_risk.max_precipitation),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ThresholdError::NotFinite { name, value });
            }
        }

        let ordered = [
            ("flood/rain", ("flood_risk", self.flood_risk), ("heavy_rain", self.heavy_rain)),
            ("flood/rain", ("heavy_rain", self.heavy_rain), ("minor rainfall", minor::RAINFALL_MM)),
            ("wind", ("severe_wind", self.severe_wind), ("high_wind", self.high_wind)),
            ("wind", ("high_wind", self.high_wind), ("minor breeze", minor::BREEZE_KMH)),
            ("heat", ("extreme_heat", self.extreme_heat), ("hot_weather", self.hot_weather)),
            ("heat", ("hot_weather", self.hot_weather), ("minor warmth", minor::WARM_C)),
            ("humidity", ("high_humidity", self.high_humidity), ("minor humidity", minor::HUMID_PCT)),
            ("cyclone/storm", ("cyclone_risk", self.cyclone_risk), ("storm wind", storm::WIND_KMH)),
            ("cyclone/storm", ("heavy_rain", self.heavy_rain), ("storm rainfall", storm::PRECIPITATION_MM)),
        ];
        for (category, (stricter, stricter_value), (looser, looser_value)) in ordered {
            if stricter_value <= looser_value {
                return Err(ThresholdError::TierOrder {
                    category,
                    stricter,
                    stricter_value,
                    looser,
                    looser_value,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ThresholdConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_lookup_without_overrides_matches_defaults() {
        let config = ThresholdConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ThresholdConfig::default());
    }

    #[test]
    fn test_lookup_overrides_are_applied() {
        let config = ThresholdConfig::from_lookup(lookup_from(&[
            ("HAZARD_FLOOD_RISK_MM", "55"),
            ("HAZARD_DROUGHT_MAX_HUMIDITY_PCT", " 35.5 "),
        ]))
        .unwrap();

        assert_eq!(config.flood_risk, 55.0);
        assert_eq!(config.drought_risk.max_humidity, 35.5);
        assert_eq!(config.heavy_rain, 20.0);
    }

    #[test]
    fn test_unparsable_override_is_rejected() {
        let error =
            ThresholdConfig::from_lookup(lookup_from(&[("HAZARD_SEVERE_WIND_KMH", "gale")]))
                .unwrap_err();

        assert_eq!(
            error,
            ThresholdError::Parse {
                key: "HAZARD_SEVERE_WIND_KMH",
                value: "gale".to_owned(),
            }
        );
    }

    #[test]
    fn test_inverted_tiers_are_rejected() {
        let config = ThresholdConfig {
            heavy_rain: 45.0,
            ..ThresholdConfig::default()
        };

        match config.validate() {
            Err(ThresholdError::TierOrder { stricter, looser, .. }) => {
                assert_eq!(stricter, "flood_risk");
                assert_eq!(looser, "heavy_rain");
            }
            other => panic!("expected tier order error, got {other:?}"),
        }
    }

    #[test]
    fn test_moderate_tier_must_exceed_fixed_minor_cutoff() {
        let config = ThresholdConfig {
            high_humidity: 65.0,
            ..ThresholdConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ThresholdError::TierOrder { category: "humidity", .. })
        ));
    }

    #[test]
    fn test_non_finite_cutoff_is_rejected() {
        let config = ThresholdConfig {
            cyclone_risk: f64::NAN,
            ..ThresholdConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ThresholdError::NotFinite { name: "cyclone_risk", .. })
        ));
    }
}
