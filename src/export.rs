//! Static snapshot host
//!
//! Fetches every city once, embeds the raw rows into a single document and
//! serves that document from `/`. Unit changes are recomputed in the browser
//! from the embedded values.

use std::path::Path;
use std::sync::Arc;

use axum::{Router, response::Html, routing::get};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::assets::PageImages;
use crate::models::{City, CityWeather, UnitPreferences};
use crate::page;
use crate::present::{Dashboard, build_dashboard};
use crate::weather::WeatherSource;
use crate::web::with_layers;
use crate::{Result, WeatherDashError};

/// Everything embedded in the exported document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub default_city: String,
    pub cities: Vec<CityWeather>,
}

impl Snapshot {
    #[must_use]
    pub fn city(&self, name: &str) -> Option<&CityWeather> {
        self.cities.iter().find(|weather| weather.city.name == name)
    }

    /// Dashboard for one embedded city, built in Rust from the embedded rows
    #[must_use]
    pub fn dashboard(&self, name: &str, units: UnitPreferences) -> Option<Dashboard> {
        self.city(name).map(|weather| build_dashboard(weather, units))
    }
}

/// Fetch every city in order. A city that fails keeps its slot with empty
/// rows.
pub async fn collect_snapshot(
    source: &dyn WeatherSource,
    cities: &[City],
    default_city: &str,
) -> Snapshot {
    let mut fetched = Vec::with_capacity(cities.len());
    for city in cities {
        let weather = source.fetch_city(city).await;
        if weather.is_empty() {
            warn!("Snapshot has no data for {}", city.name);
        }
        fetched.push(weather);
    }
    info!("Collected snapshot for {} cities", fetched.len());

    Snapshot {
        generated_at: Utc::now(),
        default_city: default_city.to_string(),
        cities: fetched,
    }
}

pub fn render_document(snapshot: &Snapshot, images: &PageImages) -> Result<String> {
    let cities: Vec<City> = snapshot
        .cities
        .iter()
        .map(|weather| weather.city.clone())
        .collect();
    page::snapshot_document(snapshot, &cities, &snapshot.default_city, images)
}

/// Read the embedded snapshot back out of a rendered document
pub fn extract_snapshot(document: &str) -> Result<Snapshot> {
    let json = page::extract_embedded_json(document)?;
    serde_json::from_str(json)
        .map_err(|e| WeatherDashError::asset(format!("Embedded snapshot is invalid: {e}")))
}

/// Save the document for opening without a server
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    std::fs::write(path, document)?;
    info!("Snapshot written to {}", path.display());
    Ok(())
}

/// One route serving the document; everything else is 404
pub fn router(document: Arc<String>) -> Router {
    let app = Router::new().route(
        "/",
        get(move || {
            let document = Arc::clone(&document);
            async move { Html(document.as_str().to_owned()) }
        }),
    );
    with_layers(app)
}
