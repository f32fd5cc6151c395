//! Data models for the weather dashboard
//!
//! This module contains the core domain models organized by concern:
//! - City: the fixed reference points the dashboard reports on
//! - Observation: daily historical and forecast rows in SI units
//! - Units: display unit preferences and their labels

pub mod city;
pub mod observation;
pub mod units;

// Re-export all public types for convenient access
pub use city::City;
pub use observation::{CityWeather, DailyForecast, DailyObservation};
pub use units::{PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};
