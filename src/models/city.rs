//! City model: a named, fixed geographic reference point

use serde::{Deserialize, Serialize};

use crate::WeatherDashError;

/// A city the dashboard reports on. The name is the unique key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct City {
    /// Display name, e.g. "Louisville, KY"
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl City {
    /// Create a new city
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Check that the coordinates are on the globe
    pub fn validate(&self) -> Result<(), WeatherDashError> {
        if self.name.trim().is_empty() {
            return Err(WeatherDashError::validation("City name cannot be empty"));
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WeatherDashError::validation(format!(
                "Latitude of '{}' must be between -90 and 90, got: {}",
                self.name, self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WeatherDashError::validation(format!(
                "Longitude of '{}' must be between -180 and 180, got: {}",
                self.name, self.longitude
            )));
        }
        Ok(())
    }
}

/// The cities shown when no other set is configured
#[must_use]
pub fn default_cities() -> Vec<City> {
    vec![
        City::new("Louisville, KY", 38.2527, -85.7585),
        City::new("Lexington, KY", 38.0406, -84.5037),
        City::new("Bowling Green, KY", 36.9685, -86.4808),
    ]
}

/// Look a city up by its name
#[must_use]
pub fn find<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
    cities.iter().find(|city| city.name == name)
}
