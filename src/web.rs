//! Reactive host
//!
//! Serves the dashboard shell and a JSON API. Every dashboard request
//! re-fetches the selected city, so there is no shared mutable state.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::models::city;
use crate::models::{City, PrecipitationUnit, TemperatureUnit, UnitPreferences, WindUnit};
use crate::present::{Dashboard, build_dashboard};
use crate::weather::WeatherSource;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
    pub cities: Arc<Vec<City>>,
    pub default_city: String,
    /// Rendered dashboard shell
    pub page: Arc<String>,
}

/// Query string of `/api/dashboard`. Missing units fall back to the page
/// defaults; unknown tokens are rejected with 400.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub city: Option<String>,
    #[serde(default)]
    pub temp_unit: TemperatureUnit,
    #[serde(default)]
    pub wind_unit: WindUnit,
    #[serde(default)]
    pub precip_unit: PrecipitationUnit,
}

impl DashboardQuery {
    fn units(&self) -> UnitPreferences {
        UnitPreferences::new(self.temp_unit, self.wind_unit, self.precip_unit)
    }
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/cities", get(get_cities))
        .route("/dashboard", get(get_dashboard));

    let app = Router::new()
        .route("/", get(get_page))
        .nest("/api", api)
        .with_state(state);

    with_layers(app)
}

/// Request tracing, permissive CORS and a plain 404 for unknown paths
pub(crate) fn with_layers(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.fallback(not_found).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    )
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn get_page(State(state): State<AppState>) -> Html<String> {
    Html(state.page.as_str().to_owned())
}

async fn get_cities(State(state): State<AppState>) -> Json<Vec<City>> {
    Json(state.cities.as_ref().clone())
}

#[instrument(skip(state))]
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<Dashboard>, StatusCode> {
    let name = query.city.as_deref().unwrap_or(&state.default_city);
    let city = city::find(&state.cities, name).ok_or(StatusCode::NOT_FOUND)?;

    let weather = state.source.fetch_city(city).await;
    let dashboard = build_dashboard(&weather, query.units());
    info!(
        "Dashboard for {} ({} history, {} forecast days)",
        city.name,
        weather.history.len(),
        weather.forecast.len()
    );
    Ok(Json(dashboard))
}

/// Bind the listening socket, with a readable error when the port is taken
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    let addr = format!("{host}:{port}");
    match TcpListener::bind(&addr).await {
        Ok(listener) => Ok(listener),
        Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
            anyhow::bail!(
                "Failed to bind {addr}: port already in use. Stop the other service or re-run with --port to choose another port."
            )
        }
        Err(err) => Err(err).with_context(|| format!("Failed to bind {addr}")),
    }
}

/// Serve until Ctrl-C
pub async fn serve(listener: TcpListener, app: Router) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;
    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
