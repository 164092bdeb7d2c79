// ABOUTME: Output formatting helpers for skycast-cli
// ABOUTME: Prints warning sets and the measurements they were derived from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SkyCast Weather Intelligence

use skycast_hazards::WarningSet;
use skycast_server::forecast::{prompt::weather_data_lines, DailyWarnings};

/// Print the stored measurements followed by the warnings
pub fn display_daily_warnings(daily: &DailyWarnings) {
    println!("\nWeather for {}", daily.date);
    println!("{}", "=".repeat(60));
    println!("{}", weather_data_lines(&daily.data_used));
    println!();
    display_warning_list(&daily.disaster_warnings);
}

/// Print one `LEVEL: message` line per warning in evaluation order
pub fn display_warning_list(warnings: &WarningSet) {
    if warnings.is_empty() {
        println!("No weather warnings for this date.");
        return;
    }

    println!("Weather Warnings ({}):", warnings.len());
    for warning in warnings {
        println!("  - {warning} [{}]", warning.category);
    }
}
