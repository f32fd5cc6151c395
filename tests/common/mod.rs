//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use weather_dash::assets::{PageImages, placeholder_data_uri};
use weather_dash::models::city::default_cities;
use weather_dash::normalize::synthetic_humidity;
use weather_dash::{
    City, DailyForecast, DailyObservation, UnitPreferences, WeatherSource, page, web,
};

/// Serves the same rows for every city
pub struct FixedSource {
    pub history: Vec<DailyObservation>,
    pub forecast: Vec<DailyForecast>,
}

impl FixedSource {
    /// A week of plausible October weather with a few awkward rounding cases
    pub fn october() -> Self {
        // (max °C, min °C, precip mm, wind km/h)
        Self::from_days(&[
            (18.3, 7.2, 0.0, 12.6),
            (21.5, 9.5, 3.8, 20.1),
            (17.0, 6.1, 12.7, 31.4),
            (14.4, 3.9, 0.2, 8.0),
            (16.7, 5.5, 0.0, 10.9),
            (20.0, 10.0, 25.4, 16.1),
            (22.8, 11.7, 1.3, 24.5),
        ])
    }

    /// Freezing week: values just below zero, exact halves and tiny totals
    pub fn cold_snap() -> Self {
        Self::from_days(&[
            (-0.3, -17.9, 0.635, 0.8),
            (0.4, -0.2, 0.0, 11.0),
            (-2.5, -8.5, 1.27, 4.5),
            (-0.5, -0.4, 0.05, 1.5),
            (2.5, -17.5, 0.0, 0.0),
            (0.5, -1.5, 6.35, 33.3),
            (-1.1, -0.04, 0.001, 2.0),
        ])
    }

    fn from_days(days: &[(f64, f64, f64, f64)]) -> Self {
        let winds: Vec<Option<f64>> = days.iter().map(|d| Some(d.3)).collect();
        let humidity = synthetic_humidity(&winds);

        let history = days
            .iter()
            .zip(humidity)
            .enumerate()
            .map(|(i, (&(max, min, precip, wind), humidity_pct))| DailyObservation {
                date: day(12 + i as u32),
                temp_max_c: max,
                temp_min_c: min,
                precip_mm: precip,
                wind_kmh: wind,
                humidity_pct,
            })
            .collect();

        let forecast = days
            .iter()
            .enumerate()
            .map(|(i, &(max, min, precip, _))| DailyForecast {
                date: day(18 + i as u32),
                temp_max_c: max - 1.0,
                temp_min_c: min + 0.5,
                precip_mm: precip * 2.0,
            })
            .collect();

        Self { history, forecast }
    }

    /// Upstream returned nothing for either range
    pub fn empty() -> Self {
        Self {
            history: Vec::new(),
            forecast: Vec::new(),
        }
    }
}

#[async_trait]
impl WeatherSource for FixedSource {
    async fn history(&self, _city: &City) -> Vec<DailyObservation> {
        self.history.clone()
    }

    async fn forecast(&self, _city: &City) -> Vec<DailyForecast> {
        self.forecast.clone()
    }
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

pub fn images() -> PageImages {
    PageImages {
        seal: placeholder_data_uri(),
        sun: placeholder_data_uri(),
        rain: placeholder_data_uri(),
        wind: placeholder_data_uri(),
    }
}

/// Reactive router over the default cities
pub fn reactive(source: FixedSource) -> Router {
    let cities = default_cities();
    let page = page::dashboard_shell(&cities, "Louisville, KY", &images()).unwrap();
    web::router(web::AppState {
        source: Arc::new(source),
        cities: Arc::new(cities),
        default_city: "Louisville, KY".to_string(),
        page: Arc::new(page),
    })
}

pub fn dashboard_uri(city: &str, units: UnitPreferences) -> String {
    let token = |value: Value| value.as_str().unwrap().to_string();
    format!(
        "/api/dashboard?city={}&temp_unit={}&wind_unit={}&precip_unit={}",
        urlencoding::encode(city),
        token(serde_json::to_value(units.temperature).unwrap()),
        token(serde_json::to_value(units.wind).unwrap()),
        token(serde_json::to_value(units.precipitation).unwrap()),
    )
}

/// Dashboard JSON with the fetch timestamp blanked out and every number as
/// a float, so `68` and `68.0` compare equal
pub fn comparable(dashboard: &Value) -> Value {
    fn floats(value: &Value) -> Value {
        match value {
            Value::Number(n) => n.as_f64().map_or(Value::Null, Value::from),
            Value::Array(items) => Value::Array(items.iter().map(floats).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), floats(value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
    let mut value = floats(dashboard);
    value["fetched_at"] = Value::Null;
    value
}

/// One request through the router
pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

/// Open-Meteo style daily body, including wind for archive requests
pub fn daily_body(dates: &[&str], wind: bool) -> Value {
    let n = dates.len();
    let mut daily = json!({
        "time": dates,
        "temperature_2m_max": vec![20.0; n],
        "temperature_2m_min": vec![10.0; n],
        "precipitation_sum": vec![25.4; n],
    });
    if wind {
        daily["windspeed_10m_max"] = json!(vec![10.0; n]);
    }
    json!({
        "latitude": 38.25,
        "longitude": -85.75,
        "timezone": "America/New_York",
        "daily": daily
    })
}
