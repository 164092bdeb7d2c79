// ABOUTME: Renders the forecast prompt and system message sent to the LLM
// ABOUTME: Lists the day's measurements and the exact warnings the forecast must repeat
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use super::ForecastStyle;
use skycast_hazards::messages::format_reading;
use skycast_hazards::{WarningSet, WeatherRecord};

const WARNINGS_INSTRUCTIONS: &str = "Important: Make sure to include a 'Weather Warnings' section in your response, \
with the exact warnings provided below. Do not use markdown formatting like # or **. \
Format the warnings as a simple text section with the same style as your forecast. \
Include this section at the end of your forecast.";

/// System message pinning the forecast length
#[must_use]
pub fn system_message(report_length: u32) -> String {
    format!("You are a weather forecaster. Generate forecasts that are exactly {report_length} words long.")
}

/// The `Weather Warnings:` block, with one `- LEVEL: message` line per warning
#[must_use]
pub fn warnings_section(warnings: &WarningSet) -> String {
    let mut section = String::from("Weather Warnings:\n\n");
    if warnings.is_empty() {
        section.push_str("No weather warnings for this date.\n");
    }
    for warning in warnings {
        section.push_str("- ");
        section.push_str(&warning.to_string());
        section.push('\n');
    }
    section
}

/// One `- Label: value` line per measurement group; absent values print `N/A`
#[must_use]
pub fn weather_data_lines(record: &WeatherRecord) -> String {
    let v = |value: Option<f64>| value.map_or_else(|| "N/A".to_owned(), format_reading);

    [
        format!(
            "- Temperature: {}°C (Feels like {}°C)",
            v(record.temperature_2m),
            v(record.apparent_temperature)
        ),
        format!("- Humidity: {}%", v(record.relative_humidity_2m)),
        format!("- Dew Point: {}°C", v(record.dew_point_2m)),
        format!(
            "- Precipitation: {} mm (Rain: {} mm, Snowfall: {} mm)",
            v(record.precipitation),
            v(record.rain),
            v(record.snowfall)
        ),
        format!("- Snow Depth: {} mm", v(record.snow_depth)),
        format!(
            "- Pressure: {} hPa (Surface: {} hPa)",
            v(record.pressure_msl),
            v(record.surface_pressure)
        ),
        format!(
            "- Cloud Cover: {}% (Low: {}%, Mid: {}%, High: {}%)",
            v(record.cloud_cover),
            v(record.cloud_cover_low),
            v(record.cloud_cover_mid),
            v(record.cloud_cover_high)
        ),
        format!(
            "- Wind: {} km/h at 10m, gusting to {} km/h",
            v(record.wind_speed_10m),
            v(record.wind_gusts_10m)
        ),
    ]
    .join("\n")
}

/// Full user prompt for one forecast
#[must_use]
pub fn build_prompt(
    date: &str,
    style: ForecastStyle,
    report_length: u32,
    record: &WeatherRecord,
    warnings: &WarningSet,
) -> String {
    format!(
        "Generate a weather forecast for {date} that is EXACTLY {report_length} words long.\n\
         Base the forecast on the following weather data.\n\
         Do not mention \"today\" or \"tomorrow\"; just focus on the future weather for this date.\n\
         {style}\n\
         {WARNINGS_INSTRUCTIONS}\n\
         Make sure the response is engaging and natural.\n\
         \n\
         Weather data:\n\
         {data}\n\
         \n\
         {warnings}\n\
         Remember: The response must be EXACTLY {report_length} words long. Not more, not less.\n\
         Make the forecast natural and engaging while maintaining accuracy.\n\
         Include the WEATHER WARNINGS section at the end of your forecast.\n",
        style = style.instruction(),
        data = weather_data_lines(record),
        warnings = warnings_section(warnings),
    )
}
