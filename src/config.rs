//! Configuration management for the weather dashboard
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherDashError;
use crate::models::City;
use crate::models::city::default_cities;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Root configuration structure for the weather dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Local HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Header image configuration
    #[serde(default)]
    pub assets: AssetsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cities offered in the city selector
    #[serde(default = "default_cities")]
    pub cities: Vec<City>,
    /// City selected when the page first loads
    #[serde(default = "default_city")]
    pub default_city: String,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Historical archive endpoint
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    /// Forecast endpoint
    #[serde(default = "default_forecast_url")]
    pub forecast_url: String,
    /// IANA timezone used for the daily buckets and for "today"
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

/// Local HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Open a browser tab once the server is listening
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

/// Header image settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the header images
    #[serde(default = "default_assets_dir")]
    pub dir: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_archive_url() -> String {
    "https://archive-api.open-meteo.com/v1/archive".to_string()
}

fn default_forecast_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_open_browser() -> bool {
    true
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_city() -> String {
    "Louisville, KY".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            archive_url: default_archive_url(),
            forecast_url: default_forecast_url(),
            timezone: default_timezone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: default_assets_dir(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            server: ServerConfig::default(),
            assets: AssetsConfig::default(),
            logging: LoggingConfig::default(),
            cities: default_cities(),
            default_city: default_city(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from `config_path`, or the default location when
    /// `None`, layered with environment variables
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. WEATHER_DASH_SERVER__PORT=9000
        builder = builder.add_source(
            Environment::with_prefix("WEATHER_DASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: DashboardConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weather-dash").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_weather()?;
        self.validate_cities()?;
        self.validate_logging()?;
        Ok(())
    }

    /// Parsed weather timezone
    pub fn timezone(&self) -> Result<chrono_tz::Tz> {
        self.weather
            .timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| {
                WeatherDashError::config(format!(
                    "Unknown timezone '{}'",
                    self.weather.timezone
                ))
                .into()
            })
    }

    fn validate_weather(&self) -> Result<()> {
        for (name, url) in [
            ("archive", &self.weather.archive_url),
            ("forecast", &self.weather.forecast_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(WeatherDashError::config(format!(
                    "Weather {name} URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }
        self.timezone()?;
        Ok(())
    }

    fn validate_cities(&self) -> Result<()> {
        if self.cities.is_empty() {
            return Err(WeatherDashError::config("At least one city must be configured").into());
        }

        let mut seen = HashSet::new();
        for city in &self.cities {
            city.validate()
                .map_err(|e| WeatherDashError::config(e.to_string()))?;
            if !seen.insert(city.name.as_str()) {
                return Err(WeatherDashError::config(format!(
                    "City '{}' is configured more than once",
                    city.name
                ))
                .into());
            }
        }

        if !seen.contains(self.default_city.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Default city '{}' is not in the city list",
                self.default_city
            ))
            .into());
        }

        Ok(())
    }

    fn validate_logging(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherDashError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}
