// ABOUTME: Human-readable warning messages rendered from a matched condition and its reading
// ABOUTME: Keeps wording separate from the threshold values that trigger it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use crate::severity::{HazardCategory, Severity};

/// A matched condition together with the readings its message quotes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Precipitation at or above the flood risk cutoff
    SevereFlood {
        /// Precipitation (mm)
        precipitation: f64,
    },
    /// Precipitation at or above the heavy rain cutoff
    FloodWatch {
        /// Precipitation (mm)
        precipitation: f64,
    },
    /// Noticeable rainfall
    Rainfall {
        /// Precipitation (mm)
        precipitation: f64,
    },
    /// Wind at or above the severe wind cutoff
    SevereWind {
        /// Maximum of sustained wind and gusts (km/h)
        wind: f64,
    },
    /// Wind at or above the high wind cutoff
    WindAdvisory {
        /// Maximum of sustained wind and gusts (km/h)
        wind: f64,
    },
    /// Breezy conditions
    Breeze {
        /// Maximum of sustained wind and gusts (km/h)
        wind: f64,
    },
    /// Temperature at or above the extreme heat cutoff
    ExtremeHeat {
        /// Temperature (°C)
        temperature: f64,
    },
    /// Temperature at or above the hot weather cutoff
    HeatAdvisory {
        /// Temperature (°C)
        temperature: f64,
    },
    /// Warm weather
    Warm {
        /// Temperature (°C)
        temperature: f64,
    },
    /// Cool weather
    Cool {
        /// Temperature (°C)
        temperature: f64,
    },
    /// Humidity at or above the high humidity cutoff
    HighHumidity {
        /// Relative humidity (%)
        humidity: f64,
    },
    /// Noticeably humid air
    Humid {
        /// Relative humidity (%)
        humidity: f64,
    },
    /// Heavy cloud cover
    Overcast {
        /// Total cloud cover (%)
        cloud_cover: f64,
    },
    /// Low mean sea level pressure
    LowPressure {
        /// Pressure (hPa)
        pressure: f64,
    },
    /// High mean sea level pressure
    HighPressure {
        /// Pressure (hPa)
        pressure: f64,
    },
    /// Very high wind combined with heavy rain
    Cyclone {
        /// Maximum of sustained wind and gusts (km/h)
        wind: f64,
        /// Precipitation (mm)
        precipitation: f64,
    },
    /// Strong wind combined with rain
    Storm {
        /// Maximum of sustained wind and gusts (km/h)
        wind: f64,
        /// Precipitation (mm)
        precipitation: f64,
    },
    /// Hot, dry and rainless
    Drought {
        /// Temperature (°C)
        temperature: f64,
        /// Relative humidity (%)
        humidity: f64,
    },
}

impl Condition {
    /// Category key reported for this condition
    #[must_use]
    pub const fn category(&self) -> HazardCategory {
        match self {
            Self::SevereFlood { .. } | Self::FloodWatch { .. } => HazardCategory::Flood,
            Self::Rainfall { .. } => HazardCategory::Rain,
            Self::SevereWind { .. } | Self::WindAdvisory { .. } | Self::Breeze { .. } => {
                HazardCategory::Wind
            }
            Self::ExtremeHeat { .. } | Self::HeatAdvisory { .. } | Self::Warm { .. } => {
                HazardCategory::Heat
            }
            Self::Cool { .. } => HazardCategory::Cold,
            Self::HighHumidity { .. } | Self::Humid { .. } => HazardCategory::Humidity,
            Self::Overcast { .. } => HazardCategory::Clouds,
            Self::LowPressure { .. } | Self::HighPressure { .. } => HazardCategory::Pressure,
            Self::Cyclone { .. } => HazardCategory::Cyclone,
            Self::Storm { .. } => HazardCategory::Storm,
            Self::Drought { .. } => HazardCategory::Drought,
        }
    }

    /// Severity attached to this condition
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::SevereFlood { .. }
            | Self::SevereWind { .. }
            | Self::ExtremeHeat { .. }
            | Self::Cyclone { .. } => Severity::Severe,
            Self::FloodWatch { .. }
            | Self::WindAdvisory { .. }
            | Self::HeatAdvisory { .. }
            | Self::HighHumidity { .. }
            | Self::Storm { .. }
            | Self::Drought { .. } => Severity::Moderate,
            Self::Rainfall { .. }
            | Self::Breeze { .. }
            | Self::Warm { .. }
            | Self::Cool { .. }
            | Self::Humid { .. }
            | Self::Overcast { .. }
            | Self::LowPressure { .. }
            | Self::HighPressure { .. } => Severity::Minor,
        }
    }

    /// Render the message shown to people
    #[must_use]
    pub fn render(&self) -> String {
        match *self {
            Self::SevereFlood { precipitation } => format!(
                "SEVERE FLOOD RISK: Extreme precipitation of {}mm expected.",
                format_reading(precipitation)
            ),
            Self::FloodWatch { precipitation } => format!(
                "FLOOD WATCH: Heavy rainfall of {}mm expected.",
                format_reading(precipitation)
            ),
            Self::Rainfall { precipitation } => format!(
                "Moderate rainfall of {}mm expected.",
                format_reading(precipitation)
            ),
            Self::SevereWind { wind } => format!(
                "SEVERE WIND WARNING: Wind speeds up to {}km/h expected.",
                format_reading(wind)
            ),
            Self::WindAdvisory { wind } => format!(
                "WIND ADVISORY: Strong winds up to {}km/h expected.",
                format_reading(wind)
            ),
            Self::Breeze { wind } => format!(
                "Breezy conditions with winds up to {}km/h expected.",
                format_reading(wind)
            ),
            Self::ExtremeHeat { temperature } => format!(
                "EXTREME HEAT WARNING: Temperatures reaching {}°C expected.",
                format_reading(temperature)
            ),
            Self::HeatAdvisory { temperature } => format!(
                "HEAT ADVISORY: Hot weather with temperatures of {}°C expected.",
                format_reading(temperature)
            ),
            Self::Warm { temperature } => format!(
                "Warm weather with temperatures of {}°C expected.",
                format_reading(temperature)
            ),
            Self::Cool { temperature } => format!(
                "Cool conditions with temperatures of {}°C expected.",
                format_reading(temperature)
            ),
            Self::HighHumidity { humidity } => format!(
                "HIGH HUMIDITY: Uncomfortable conditions with humidity at {}%.",
                format_reading(humidity)
            ),
            Self::Humid { humidity } => format!(
                "Moderately humid conditions ({}%) may cause discomfort.",
                format_reading(humidity)
            ),
            Self::Overcast { cloud_cover } => format!(
                "OVERCAST CONDITIONS: Heavy cloud cover ({}%) expected.",
                format_reading(cloud_cover)
            ),
            Self::LowPressure { pressure } => format!(
                "LOW PRESSURE SYSTEM: Atmospheric pressure of {}hPa may lead to unsettled weather.",
                format_reading(pressure)
            ),
            Self::HighPressure { pressure } => format!(
                "HIGH PRESSURE SYSTEM: Atmospheric pressure of {}hPa indicating stable conditions.",
                format_reading(pressure)
            ),
            Self::Cyclone {
                wind,
                precipitation,
            } => format!(
                "CYCLONE WARNING: High winds ({}km/h) with heavy rainfall ({}mm).",
                format_reading(wind),
                format_reading(precipitation)
            ),
            Self::Storm {
                wind,
                precipitation,
            } => format!(
                "STORM CONDITIONS: Moderate winds ({}km/h) with rainfall ({}mm).",
                format_reading(wind),
                format_reading(precipitation)
            ),
            Self::Drought {
                temperature,
                humidity,
            } => format!(
                "DROUGHT CONDITIONS: High temperature ({}°C), low humidity ({}%), minimal precipitation.",
                format_reading(temperature),
                format_reading(humidity)
            ),
        }
    }
}

/// Format a reading with at least one decimal place (`45` renders as `45.0`)
#[must_use]
pub fn format_reading(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_readings_keep_one_decimal() {
        assert_eq!(format_reading(45.0), "45.0");
        assert_eq!(format_reading(-3.0), "-3.0");
        assert_eq!(format_reading(0.0), "0.0");
    }

    #[test]
    fn test_fractional_readings_are_not_truncated() {
        assert_eq!(format_reading(12.5), "12.5");
        assert_eq!(format_reading(1013.25), "1013.25");
    }

    #[test]
    fn test_combined_message_quotes_both_readings() {
        let message = Condition::Cyclone {
            wind: 75.0,
            precipitation: 25.0,
        }
        .render();
        assert_eq!(
            message,
            "CYCLONE WARNING: High winds (75.0km/h) with heavy rainfall (25.0mm)."
        );
    }

    #[test]
    fn test_condition_metadata() {
        let cool = Condition::Cool { temperature: 4.0 };
        assert_eq!(cool.category(), HazardCategory::Cold);
        assert_eq!(cool.severity(), Severity::Minor);

        let drought = Condition::Drought {
            temperature: 36.0,
            humidity: 20.0,
        };
        assert_eq!(drought.category(), HazardCategory::Drought);
        assert_eq!(drought.severity(), Severity::Moderate);
    }
}
