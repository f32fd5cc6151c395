//! Daily weather rows in the provider's native SI units

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::City;

/// One day of historical weather
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyObservation {
    /// Calendar day, unique within one fetched range
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temp_max_c: f64,
    /// Minimum temperature in Celsius
    pub temp_min_c: f64,
    /// Precipitation sum in millimeters
    pub precip_mm: f64,
    /// Maximum wind speed in km/h
    pub wind_kmh: f64,
    /// Synthetic humidity percentage, see [`crate::normalize::synthetic_humidity`]
    pub humidity_pct: u16,
}

/// One day of forecast weather
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Maximum temperature in Celsius
    pub temp_max_c: f64,
    /// Minimum temperature in Celsius
    pub temp_min_c: f64,
    /// Precipitation sum in millimeters
    pub precip_mm: f64,
}

/// Everything fetched for one city in one refresh
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityWeather {
    pub city: City,
    pub history: Vec<DailyObservation>,
    pub forecast: Vec<DailyForecast>,
    /// When this data was retrieved
    pub fetched_at: DateTime<Utc>,
}

impl CityWeather {
    /// True when either range came back empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty() || self.forecast.is_empty()
    }

    /// First and last day of the historical rows
    #[must_use]
    pub fn history_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.history.iter().map(|o| o.date).min()?;
        let end = self.history.iter().map(|o| o.date).max()?;
        Some((start, end))
    }
}
