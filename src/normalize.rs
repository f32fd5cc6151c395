//! Unit conversion and display rounding
//!
//! Raw SI values stay the single source of truth: every converted field is
//! derived straight from the stored Celsius, km/h or millimeter value, never
//! from another converted value.
//!
//! Rounding is round-half-to-even at the requested number of decimals.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    DailyForecast, DailyObservation, PrecipitationUnit, TemperatureUnit, UnitPreferences,
    WindUnit,
};

pub const MPH_PER_KMH: f64 = 0.621371;
pub const MM_PER_INCH: f64 = 25.4;
pub const MM_PER_CM: f64 = 10.0;

/// Baseline added to the rolling wind mean to fake a humidity reading
pub const HUMIDITY_BASELINE: f64 = 60.0;
/// Days in the humidity rolling window (current day plus the one before)
pub const HUMIDITY_WINDOW: usize = 2;

/// Round `value` to `decimals` places, ties to even
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    // `+ 0.0` folds -0.0 into 0.0 so small negatives never print as "-0"
    (value * factor).round_ties_even() / factor + 0.0
}

#[must_use]
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

/// Temperature for display, whole degrees
#[must_use]
pub fn convert_temperature(celsius: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Fahrenheit => round_to(celsius_to_fahrenheit(celsius), 0),
        TemperatureUnit::Celsius => round_to(celsius, 0),
    }
}

/// Wind speed for display, whole units
#[must_use]
pub fn convert_wind(kmh: f64, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Mph => round_to(kmh * MPH_PER_KMH, 0),
        WindUnit::Kmh => round_to(kmh, 0),
    }
}

/// Precipitation for display, two decimals
#[must_use]
pub fn convert_precipitation(mm: f64, unit: PrecipitationUnit) -> f64 {
    match unit {
        PrecipitationUnit::Inches => round_to(mm / MM_PER_INCH, 2),
        PrecipitationUnit::Centimeters => round_to(mm / MM_PER_CM, 2),
    }
}

/// Synthetic humidity for a run of consecutive daily wind speeds.
///
/// PLACEHOLDER: this is not a humidity measurement or a physical model. It is
/// `60 + rolling_mean(wind_kmh, window = 2, min_periods = 1)` rounded to a
/// whole percent, kept only so the humidity chart matches the dashboard it
/// replaces. The window is the current and the immediately preceding calendar
/// day; a missing wind value is skipped inside its window, and a window with
/// no values at all counts as a mean of 0.
#[must_use]
pub fn synthetic_humidity(wind_kmh: &[Option<f64>]) -> Vec<u16> {
    (0..wind_kmh.len())
        .map(|i| {
            let window = &wind_kmh[i.saturating_sub(HUMIDITY_WINDOW - 1)..=i];
            let present: Vec<f64> = window.iter().flatten().copied().collect();
            let mean = if present.is_empty() {
                0.0
            } else {
                present.iter().sum::<f64>() / present.len() as f64
            };
            round_to(HUMIDITY_BASELINE + mean, 0) as u16
        })
        .collect()
}

/// A daily row converted into the selected units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precip: f64,
    /// Only present for historical rows
    pub wind: Option<f64>,
    /// Only present for historical rows
    pub humidity_pct: Option<u16>,
}

impl DisplayRow {
    #[must_use]
    pub fn from_observation(row: &DailyObservation, units: UnitPreferences) -> Self {
        Self {
            date: row.date,
            temp_max: convert_temperature(row.temp_max_c, units.temperature),
            temp_min: convert_temperature(row.temp_min_c, units.temperature),
            precip: convert_precipitation(row.precip_mm, units.precipitation),
            wind: Some(convert_wind(row.wind_kmh, units.wind)),
            humidity_pct: Some(row.humidity_pct),
        }
    }

    #[must_use]
    pub fn from_forecast(row: &DailyForecast, units: UnitPreferences) -> Self {
        Self {
            date: row.date,
            temp_max: convert_temperature(row.temp_max_c, units.temperature),
            temp_min: convert_temperature(row.temp_min_c, units.temperature),
            precip: convert_precipitation(row.precip_mm, units.precipitation),
            wind: None,
            humidity_pct: None,
        }
    }
}

/// Convert historical rows. Empty input gives empty output.
#[must_use]
pub fn display_observations(rows: &[DailyObservation], units: UnitPreferences) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| DisplayRow::from_observation(row, units))
        .collect()
}

/// Convert forecast rows. Empty input gives empty output.
#[must_use]
pub fn display_forecasts(rows: &[DailyForecast], units: UnitPreferences) -> Vec<DisplayRow> {
    rows.iter()
        .map(|row| DisplayRow::from_forecast(row, units))
        .collect()
}
