//! Display unit preferences
//!
//! Serialized tokens match the control values of the dashboard page
//! (`fahrenheit`/`celsius`, `mph`/`kph`, `in`/`cm`).

use serde::{Deserialize, Serialize};

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        }
    }
}

/// Wind speed display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[default]
    #[serde(rename = "mph")]
    Mph,
    #[serde(rename = "kph")]
    Kmh,
}

impl WindUnit {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            WindUnit::Mph => "mph",
            WindUnit::Kmh => "km/h",
        }
    }

    /// Upper bound of the wind gauge axis
    #[must_use]
    pub fn gauge_ceiling(self) -> f64 {
        match self {
            WindUnit::Mph => 50.0,
            WindUnit::Kmh => 80.0,
        }
    }
}

/// Precipitation display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrecipitationUnit {
    #[default]
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "cm")]
    Centimeters,
}

impl PrecipitationUnit {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PrecipitationUnit::Inches => "inches",
            PrecipitationUnit::Centimeters => "cm",
        }
    }
}

/// The unit selection for one render. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitPreferences {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
    pub precipitation: PrecipitationUnit,
}

impl UnitPreferences {
    #[must_use]
    pub fn new(
        temperature: TemperatureUnit,
        wind: WindUnit,
        precipitation: PrecipitationUnit,
    ) -> Self {
        Self {
            temperature,
            wind,
            precipitation,
        }
    }

    /// Every combination of units, in a stable order
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut combos = Vec::with_capacity(8);
        for temperature in [TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius] {
            for wind in [WindUnit::Mph, WindUnit::Kmh] {
                for precipitation in [PrecipitationUnit::Inches, PrecipitationUnit::Centimeters] {
                    combos.push(Self::new(temperature, wind, precipitation));
                }
            }
        }
        combos
    }
}
