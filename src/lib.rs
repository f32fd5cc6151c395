//! `weather-dash` - Kentucky weather dashboard
//!
//! Fetches a week of Open-Meteo observations and a week of forecasts for a
//! few Kentucky cities and renders them as charts, a map and a table in the
//! browser, either through a reactive local server or a static snapshot.

pub mod assets;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod page;
pub mod present;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::DashboardConfig;
pub use error::WeatherDashError;
pub use export::Snapshot;
pub use models::{City, CityWeather, DailyForecast, DailyObservation, UnitPreferences};
pub use present::{Dashboard, build_dashboard};
pub use weather::{OpenMeteoClient, WeatherSource};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherDashError>;
