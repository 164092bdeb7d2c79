// ABOUTME: Weather record input type and the normalizer producing typed observations
// ABOUTME: Absent, null, or unparsable measurements collapse to per-field defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

//! Weather record normalization
//!
//! A [`WeatherRecord`] mirrors one stored observation day: every measurement
//! is optional because upstream stores are sparse and occasionally hold
//! strings where numbers belong. [`Observation`] is the fully populated view
//! the classifier works on.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Per-field defaults applied when a measurement is missing or unusable
pub mod defaults {
    /// Default for measurements without a specific neutral value
    pub const ZERO: f64 = 0.0;
    /// Relative humidity assumed when none is recorded (%)
    pub const RELATIVE_HUMIDITY: f64 = 50.0;
    /// Standard atmosphere pressure assumed when none is recorded (hPa)
    pub const PRESSURE_HPA: f64 = 1013.25;
}

/// Short field names accepted in place of the canonical ones, as `(alias, canonical)`
///
/// When several aliases name the same field, the earliest entry wins.
const FIELD_ALIASES: &[(&str, &str)] = &[
    ("temperature", "temperature_2m"),
    ("humidity", "relative_humidity_2m"),
    ("relative_humidity", "relative_humidity_2m"),
];

/// One day of weather measurements as supplied by the weather store
///
/// Deserialization never fails on field values: numbers, numeric strings and
/// `null` are all accepted, anything else is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Observation date as stored (may include a time component)
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Air temperature at 2m (°C)
    #[serde(
        default,
        alias = "temperature",
        deserialize_with = "lenient_measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature_2m: Option<f64>,
    /// Apparent ("feels like") temperature (°C)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<f64>,
    /// Relative humidity at 2m (%)
    #[serde(
        default,
        alias = "humidity",
        alias = "relative_humidity",
        deserialize_with = "lenient_measurement",
        skip_serializing_if = "Option::is_none"
    )]
    pub relative_humidity_2m: Option<f64>,
    /// Dew point at 2m (°C)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub dew_point_2m: Option<f64>,
    /// Total precipitation (mm)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    /// Liquid rain (mm)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
    /// Snowfall (mm)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub snowfall: Option<f64>,
    /// Snow depth (mm)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub snow_depth: Option<f64>,
    /// Mean sea level pressure (hPa)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub pressure_msl: Option<f64>,
    /// Surface pressure (hPa)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub surface_pressure: Option<f64>,
    /// Total cloud cover (%)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub cloud_cover: Option<f64>,
    /// Low cloud cover (%)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub cloud_cover_low: Option<f64>,
    /// Mid cloud cover (%)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub cloud_cover_mid: Option<f64>,
    /// High cloud cover (%)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub cloud_cover_high: Option<f64>,
    /// Wind speed at 10m (km/h)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub wind_speed_10m: Option<f64>,
    /// Wind speed at 100m (km/h)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub wind_speed_100m: Option<f64>,
    /// Wind direction at 10m (degrees)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub wind_direction_10m: Option<f64>,
    /// Wind direction at 100m (degrees)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub wind_direction_100m: Option<f64>,
    /// Wind gusts at 10m (km/h)
    #[serde(default, deserialize_with = "lenient_measurement", skip_serializing_if = "Option::is_none")]
    pub wind_gusts_10m: Option<f64>,
}

impl WeatherRecord {
    /// Build a record from an arbitrary JSON value
    ///
    /// Objects are read field by field; any other JSON value yields an empty
    /// record, which normalizes to the default observation.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        Self::deserialize(&Value::Object(resolve_aliases(fields))).unwrap_or_default()
    }

    /// Produce the fully populated observation used by the classifier
    #[must_use]
    pub fn normalize(&self) -> Observation {
        Observation::from(self)
    }

    /// Render the record as a JSON object, omitting absent fields
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

/// Rewrite alias keys to their canonical names, one field at a time
///
/// An alias is dropped when its canonical key is already present, so a
/// conflict on one field never affects another.
fn resolve_aliases(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut resolved = fields.clone();
    for (alias, canonical) in FIELD_ALIASES {
        if let Some(value) = resolved.remove(*alias) {
            if !resolved.contains_key(*canonical) {
                resolved.insert((*canonical).to_owned(), value);
            }
        }
    }
    resolved
}

/// Coerce a loosely typed JSON value into a finite measurement
#[must_use]
pub fn coerce_measurement(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

fn lenient_measurement<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_measurement))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Normalized, fully populated weather observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Air temperature at 2m (°C)
    pub temperature: f64,
    /// Apparent temperature (°C)
    pub apparent_temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Dew point (°C)
    pub dew_point: f64,
    /// Total precipitation (mm)
    pub precipitation: f64,
    /// Rain (mm)
    pub rain: f64,
    /// Snowfall (mm)
    pub snowfall: f64,
    /// Snow depth (mm)
    pub snow_depth: f64,
    /// Mean sea level pressure (hPa)
    pub pressure_msl: f64,
    /// Surface pressure (hPa)
    pub surface_pressure: f64,
    /// Total cloud cover (%)
    pub cloud_cover: f64,
    /// Low cloud cover (%)
    pub cloud_cover_low: f64,
    /// Mid cloud cover (%)
    pub cloud_cover_mid: f64,
    /// High cloud cover (%)
    pub cloud_cover_high: f64,
    /// Wind speed at 10m (km/h)
    pub wind_speed_10m: f64,
    /// Wind speed at 100m (km/h)
    pub wind_speed_100m: f64,
    /// Wind direction at 10m (degrees)
    pub wind_direction_10m: f64,
    /// Wind direction at 100m (degrees)
    pub wind_direction_100m: f64,
    /// Wind gusts at 10m (km/h)
    pub wind_gusts_10m: f64,
}

impl Observation {
    /// Strongest near-surface wind: sustained speed or gusts, whichever is higher
    #[must_use]
    pub fn max_wind(&self) -> f64 {
        self.wind_speed_10m.max(self.wind_gusts_10m)
    }
}

impl Default for Observation {
    fn default() -> Self {
        Self::from(&WeatherRecord::default())
    }
}

impl From<&WeatherRecord> for Observation {
    fn from(record: &WeatherRecord) -> Self {
        let or_zero = |value: Option<f64>| value.unwrap_or(defaults::ZERO);

        Self {
            temperature: or_zero(record.temperature_2m),
            apparent_temperature: or_zero(record.apparent_temperature),
            humidity: record
                .relative_humidity_2m
                .unwrap_or(defaults::RELATIVE_HUMIDITY),
            dew_point: or_zero(record.dew_point_2m),
            precipitation: or_zero(record.precipitation),
            rain: or_zero(record.rain),
            snowfall: or_zero(record.snowfall),
            snow_depth: or_zero(record.snow_depth),
            pressure_msl: record.pressure_msl.unwrap_or(defaults::PRESSURE_HPA),
            surface_pressure: record.surface_pressure.unwrap_or(defaults::PRESSURE_HPA),
            cloud_cover: or_zero(record.cloud_cover),
            cloud_cover_low: or_zero(record.cloud_cover_low),
            cloud_cover_mid: or_zero(record.cloud_cover_mid),
            cloud_cover_high: or_zero(record.cloud_cover_high),
            wind_speed_10m: or_zero(record.wind_speed_10m),
            wind_speed_100m: or_zero(record.wind_speed_100m),
            wind_direction_10m: or_zero(record.wind_direction_10m),
            wind_direction_100m: or_zero(record.wind_direction_100m),
            wind_gusts_10m: or_zero(record.wind_gusts_10m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_uses_field_defaults() {
        let observation = WeatherRecord::default().normalize();

        assert_eq!(observation.temperature, 0.0);
        assert_eq!(observation.precipitation, 0.0);
        assert_eq!(observation.humidity, 50.0);
        assert_eq!(observation.pressure_msl, 1013.25);
        assert_eq!(observation.surface_pressure, 1013.25);
        assert_eq!(observation.max_wind(), 0.0);
    }

    #[test]
    fn test_lenient_values_coerce_or_fall_back() {
        let record = WeatherRecord::from_json(&json!({
            "precipitation": "12.5",
            "relative_humidity_2m": "damp",
            "pressure_msl": null,
            "wind_speed_10m": true,
            "wind_gusts_10m": [1, 2],
            "cloud_cover": 88,
            "_id": "ignored",
        }));
        let observation = record.normalize();

        assert_eq!(observation.precipitation, 12.5);
        assert_eq!(observation.humidity, 50.0);
        assert_eq!(observation.pressure_msl, 1013.25);
        assert_eq!(observation.wind_speed_10m, 0.0);
        assert_eq!(observation.wind_gusts_10m, 0.0);
        assert_eq!(observation.cloud_cover, 88.0);
    }

    #[test]
    fn test_non_finite_strings_are_rejected() {
        assert_eq!(coerce_measurement(&json!("NaN")), None);
        assert_eq!(coerce_measurement(&json!("inf")), None);
        assert_eq!(coerce_measurement(&json!(" 7 ")), Some(7.0));
    }

    #[test]
    fn test_non_object_json_yields_empty_record() {
        assert_eq!(WeatherRecord::from_json(&json!([1, 2, 3])), WeatherRecord::default());
        assert_eq!(WeatherRecord::from_json(&json!("rain")), WeatherRecord::default());
    }

    #[test]
    fn test_short_field_aliases_are_accepted() {
        let record = WeatherRecord::from_json(&json!({ "temperature": 39, "humidity": 20 }));

        assert_eq!(record.temperature_2m, Some(39.0));
        assert_eq!(record.relative_humidity_2m, Some(20.0));
    }

    #[test]
    fn test_canonical_field_wins_over_duplicate_alias() {
        let record = WeatherRecord::from_json(&json!({
            "temperature_2m": 31,
            "temperature": 12,
            "precipitation": 4,
        }));

        assert_eq!(record.temperature_2m, Some(31.0));
        assert_eq!(record.precipitation, Some(4.0));
    }

    #[test]
    fn test_alias_conflict_leaves_other_aliases_intact() {
        let record = WeatherRecord::from_json(&json!({
            "temperature": 39,
            "humidity": 80,
            "relative_humidity_2m": 82,
        }));

        assert_eq!(record.temperature_2m, Some(39.0));
        assert_eq!(record.relative_humidity_2m, Some(82.0));
    }

    #[test]
    fn test_first_alias_wins_when_two_name_the_same_field() {
        let record = WeatherRecord::from_json(&json!({
            "humidity": 64,
            "relative_humidity": 71,
        }));

        assert_eq!(record.relative_humidity_2m, Some(64.0));
    }

    #[test]
    fn test_max_wind_prefers_gusts_when_higher() {
        let record = WeatherRecord {
            wind_speed_10m: Some(55.0),
            wind_gusts_10m: Some(80.0),
            ..WeatherRecord::default()
        };
        assert_eq!(record.normalize().max_wind(), 80.0);
    }

    #[test]
    fn test_to_json_omits_absent_fields() {
        let record = WeatherRecord {
            date: Some("2025-02-28".to_owned()),
            rain: Some(3.0),
            ..WeatherRecord::default()
        };
        let value = record.to_json();

        assert_eq!(value["date"], "2025-02-28");
        assert_eq!(value["rain"], 3.0);
        assert!(value.get("snowfall").is_none());
    }
}
