//! Weather API client for Open-Meteo
//!
//! Two daily requests per city: the archive endpoint for the past week and
//! the forecast endpoint for the coming week. Any failure (timeout, non-2xx
//! status, malformed or incomplete body) degrades to an empty result. There
//! are no retries.

use crate::Result;
use crate::config::WeatherConfig;
use crate::models::{City, CityWeather, DailyForecast, DailyObservation};
use crate::{WeatherDashError, normalize};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Transport timeout for every weather request
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Days before (history) or after (forecast) today in a fetched range
pub const RANGE_SPAN_DAYS: u64 = 6;

const HISTORY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,windspeed_10m_max";
const FORECAST_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Inclusive range of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `[today - 6, today]`
    #[must_use]
    pub fn historical(today: NaiveDate) -> Self {
        Self {
            start: today - Days::new(RANGE_SPAN_DAYS),
            end: today,
        }
    }

    /// `[today, today + 6]`
    #[must_use]
    pub fn forecast(today: NaiveDate) -> Self {
        Self {
            start: today,
            end: today + Days::new(RANGE_SPAN_DAYS),
        }
    }
}

/// Something that can produce daily weather rows for a city
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Past week of observations, or empty when no data is available
    async fn history(&self, city: &City) -> Vec<DailyObservation>;

    /// Coming week of forecasts, or empty when no data is available
    async fn forecast(&self, city: &City) -> Vec<DailyForecast>;

    /// Both ranges for one city, stamped with the time they were fetched
    async fn fetch_city(&self, city: &City) -> CityWeather {
        let history = self.history(city).await;
        let forecast = self.forecast(city).await;
        CityWeather {
            city: city.clone(),
            history,
            forecast,
            fetched_at: Utc::now(),
        }
    }
}

/// Weather API client for Open-Meteo
pub struct OpenMeteoClient {
    /// HTTP client
    client: Client,
    archive_url: String,
    forecast_url: String,
    timezone: Tz,
}

impl OpenMeteoClient {
    /// Create a new weather API client
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let timezone = config.timezone.parse::<Tz>().map_err(|_| {
            WeatherDashError::config(format!("Unknown timezone '{}'", config.timezone))
        })?;

        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("weather-dash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            archive_url: config.archive_url.clone(),
            forecast_url: config.forecast_url.clone(),
            timezone,
        })
    }

    /// Today's date in the configured timezone
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }

    /// Observations for an explicit range
    #[instrument(skip(self, city), fields(city = %city.name))]
    pub async fn history_in(&self, city: &City, range: DateRange) -> Vec<DailyObservation> {
        let result = self
            .request_daily(&self.archive_url, city, HISTORY_FIELDS, range)
            .await
            .and_then(openmeteo::DailyData::into_observations);
        degrade_to_empty(result, "history", city)
    }

    /// Forecasts for an explicit range
    #[instrument(skip(self, city), fields(city = %city.name))]
    pub async fn forecast_in(&self, city: &City, range: DateRange) -> Vec<DailyForecast> {
        let result = self
            .request_daily(&self.forecast_url, city, FORECAST_FIELDS, range)
            .await
            .and_then(openmeteo::DailyData::into_forecasts);
        degrade_to_empty(result, "forecast", city)
    }

    async fn request_daily(
        &self,
        url: &str,
        city: &City,
        fields: &str,
        range: DateRange,
    ) -> Result<openmeteo::DailyData> {
        let start_time = Instant::now();
        debug!(
            "Requesting {} for {} ({} to {})",
            url, city.name, range.start, range.end
        );

        let response = self
            .client
            .get(url)
            .query(&[
                ("latitude", city.latitude.to_string()),
                ("longitude", city.longitude.to_string()),
                ("daily", fields.to_string()),
                ("timezone", self.timezone.name().to_string()),
                ("start_date", range.start.to_string()),
                ("end_date", range.end.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherDashError::api(format!(
                "Open-Meteo request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )));
        }

        let body: openmeteo::DailyResponse = response.json().await?;

        debug!(
            "Open-Meteo responded in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );

        body.daily
            .ok_or_else(|| WeatherDashError::api("Response has no 'daily' object"))
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoClient {
    async fn history(&self, city: &City) -> Vec<DailyObservation> {
        self.history_in(city, DateRange::historical(self.today()))
            .await
    }

    async fn forecast(&self, city: &City) -> Vec<DailyForecast> {
        self.forecast_in(city, DateRange::forecast(self.today()))
            .await
    }
}

fn degrade_to_empty<T>(result: Result<Vec<T>>, what: &str, city: &City) -> Vec<T> {
    match result {
        Ok(rows) if rows.is_empty() => {
            info!("No {} data for {}", what, city.name);
            rows
        }
        Ok(rows) => {
            info!("Fetched {} {} days for {}", rows.len(), what, city.name);
            rows
        }
        Err(e) => {
            warn!("Failed to fetch {} for {}: {}", what, city.name, e);
            Vec::new()
        }
    }
}

/// `Open-Meteo` API response structures and conversion utilities
mod openmeteo {
    use super::{DailyForecast, DailyObservation, normalize};
    use crate::{Result, WeatherDashError};
    use chrono::NaiveDate;
    use serde::Deserialize;
    use tracing::debug;

    /// Envelope of a daily request
    #[derive(Debug, Deserialize)]
    pub struct DailyResponse {
        pub daily: Option<DailyData>,
    }

    /// Parallel per-day arrays. Every field is optional here so that a
    /// missing one is reported by the schema check instead of a serde error.
    #[derive(Debug, Deserialize)]
    pub struct DailyData {
        pub time: Option<Vec<String>>,
        #[serde(rename = "temperature_2m_max")]
        pub temperature_max: Option<Vec<Option<f64>>>,
        #[serde(rename = "temperature_2m_min")]
        pub temperature_min: Option<Vec<Option<f64>>>,
        #[serde(rename = "precipitation_sum")]
        pub precipitation: Option<Vec<Option<f64>>>,
        #[serde(rename = "windspeed_10m_max")]
        pub wind_speed_max: Option<Vec<Option<f64>>>,
    }

    fn column<'a>(
        name: &str,
        values: &'a Option<Vec<Option<f64>>>,
        len: usize,
    ) -> Result<&'a [Option<f64>]> {
        let values = values
            .as_deref()
            .ok_or_else(|| WeatherDashError::api(format!("Response is missing daily.{name}")))?;
        if values.len() != len {
            return Err(WeatherDashError::api(format!(
                "daily.{name} has {} values for {len} days",
                values.len()
            )));
        }
        Ok(values)
    }

    impl DailyData {
        fn dates(&self) -> Result<Vec<NaiveDate>> {
            let time = self
                .time
                .as_ref()
                .ok_or_else(|| WeatherDashError::api("Response is missing daily.time"))?;
            time.iter()
                .map(|day| {
                    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|_| {
                        WeatherDashError::api(format!("Unparseable date '{day}' in daily.time"))
                    })
                })
                .collect()
        }

        /// Historical rows with synthetic humidity. Humidity is computed over
        /// the full run of days first, so a `null` day only leaves a gap in the
        /// window of the day after it. Days with a `null` value are then
        /// dropped whole.
        pub fn into_observations(self) -> Result<Vec<DailyObservation>> {
            let dates = self.dates()?;
            let len = dates.len();
            let max = column("temperature_2m_max", &self.temperature_max, len)?;
            let min = column("temperature_2m_min", &self.temperature_min, len)?;
            let precip = column("precipitation_sum", &self.precipitation, len)?;
            let wind = column("windspeed_10m_max", &self.wind_speed_max, len)?;
            let humidity = normalize::synthetic_humidity(wind);

            let rows: Vec<DailyObservation> = dates
                .into_iter()
                .enumerate()
                .filter_map(|(i, date)| {
                    Some(DailyObservation {
                        date,
                        temp_max_c: max[i]?,
                        temp_min_c: min[i]?,
                        precip_mm: precip[i]?,
                        wind_kmh: wind[i]?,
                        humidity_pct: humidity[i],
                    })
                })
                .collect();
            if rows.len() < len {
                debug!("Dropped {} incomplete days", len - rows.len());
            }
            Ok(rows)
        }

        /// Forecast rows. Days with a `null` value are dropped whole.
        pub fn into_forecasts(self) -> Result<Vec<DailyForecast>> {
            let dates = self.dates()?;
            let len = dates.len();
            let max = column("temperature_2m_max", &self.temperature_max, len)?;
            let min = column("temperature_2m_min", &self.temperature_min, len)?;
            let precip = column("precipitation_sum", &self.precipitation, len)?;

            let rows: Vec<DailyForecast> = dates
                .into_iter()
                .enumerate()
                .filter_map(|(i, date)| {
                    Some(DailyForecast {
                        date,
                        temp_max_c: max[i]?,
                        temp_min_c: min[i]?,
                        precip_mm: precip[i]?,
                    })
                })
                .collect();
            if rows.len() < len {
                debug!("Dropped {} incomplete days", len - rows.len());
            }
            Ok(rows)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_historical_range() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let range = DateRange::historical(today);
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(range.end, today);
    }

    #[test]
    fn test_forecast_range() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 28).unwrap();
        let range = DateRange::forecast(today);
        assert_eq!(range.start, today);
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2027, 1, 3).unwrap());
    }

    #[test]
    fn test_client_rejects_unknown_timezone() {
        let config = WeatherConfig {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..WeatherConfig::default()
        };
        assert!(OpenMeteoClient::new(&config).is_err());
    }
}
