//! Both hosts driven through their routers

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{FixedSource, comparable, dashboard_uri, get, images, reactive};
use weather_dash::export::{self, collect_snapshot, extract_snapshot, render_document};
use weather_dash::models::city::default_cities;
use weather_dash::present::NO_DATA;
use weather_dash::{City, Dashboard, UnitPreferences, WeatherSource, build_dashboard};

#[tokio::test]
async fn test_shell_page() {
    let (status, body) = get(reactive(FixedSource::october()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Kentucky Weather Dashboard"));
    assert!(body.contains(r#"<option value="Bowling Green, KY">"#));
    assert!(body.contains("data:image/png;base64,"));
}

#[tokio::test]
async fn test_cities_endpoint() {
    let (status, body) = get(reactive(FixedSource::october()), "/api/cities").await;

    assert_eq!(status, StatusCode::OK);
    let cities: Vec<City> = serde_json::from_str(&body).unwrap();
    assert_eq!(cities, default_cities());
}

#[tokio::test]
async fn test_dashboard_defaults() {
    let (status, body) = get(reactive(FixedSource::october()), "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    let dashboard: Dashboard = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.city, "Louisville, KY");
    assert_eq!(dashboard.units, UnitPreferences::default());
    assert_eq!(dashboard.labels.temperature, "°F");
    assert!(!dashboard.no_data);
    assert_eq!(dashboard.table.len(), 7);
    assert_eq!(dashboard.date_range.unwrap().start, common::day(12));
    assert_eq!(dashboard.date_range.unwrap().end, common::day(18));
}

#[tokio::test]
async fn test_dashboard_for_selected_city_and_units() {
    let units = UnitPreferences::all()[7];
    let uri = dashboard_uri("Bowling Green, KY", units);
    let (status, body) = get(reactive(FixedSource::october()), &uri).await;

    assert_eq!(status, StatusCode::OK);
    let dashboard: Dashboard = serde_json::from_str(&body).unwrap();
    assert_eq!(dashboard.city, "Bowling Green, KY");
    assert_eq!(dashboard.units, units);
    assert!(dashboard.forecast_chart.title.starts_with("Bowling Green, KY 7-Day Forecast"));
}

#[tokio::test]
async fn test_unknown_city_is_not_found() {
    let (status, _) = get(
        reactive(FixedSource::october()),
        "/api/dashboard?city=Paducah%2C%20KY",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_unit_is_bad_request() {
    let (status, _) = get(
        reactive(FixedSource::october()),
        "/api/dashboard?temp_unit=kelvin",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, _) = get(reactive(FixedSource::october()), "/static/app.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_upstream_is_uniform_no_data() {
    let (status, body) = get(reactive(FixedSource::empty()), "/api/dashboard").await;

    assert_eq!(status, StatusCode::OK);
    let dashboard: Dashboard = serde_json::from_str(&body).unwrap();
    assert!(dashboard.no_data);
    assert!(dashboard.cards.is_empty());
    assert!(dashboard.table.is_empty());
    assert!(dashboard.date_range.is_none());
    for chart in [
        &dashboard.forecast_chart,
        &dashboard.temperature_chart,
        &dashboard.humidity_chart,
        &dashboard.precipitation_chart,
    ] {
        assert_eq!(chart.annotation.as_deref(), Some(NO_DATA));
    }
    assert_eq!(dashboard.wind_gauge.annotation.as_deref(), Some(NO_DATA));
}

#[tokio::test]
async fn test_snapshot_serves_only_the_document() {
    let source = FixedSource::october();
    let snapshot = collect_snapshot(&source, &default_cities(), "Louisville, KY").await;
    let document = render_document(&snapshot, &images()).unwrap();
    let app = export::router(Arc::new(document.clone()));

    let (status, body) = get(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, document);

    for uri in ["/api/dashboard", "/api/cities", "/index.html"] {
        let (status, _) = get(app.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

/// Rows that went through the document rebuild the served dashboard in Rust.
/// The page script itself is checked in `page_script.rs`.
#[tokio::test]
async fn test_embedded_rows_rebuild_served_dashboard() {
    let source = FixedSource::october();
    let cities = default_cities();
    let snapshot = collect_snapshot(&source, &cities, "Louisville, KY").await;
    let embedded = extract_snapshot(&render_document(&snapshot, &images()).unwrap()).unwrap();
    let app = reactive(FixedSource::october());

    for city in &cities {
        for units in UnitPreferences::all() {
            let (status, body) = get(app.clone(), &dashboard_uri(&city.name, units)).await;
            assert_eq!(status, StatusCode::OK);
            let served: Dashboard = serde_json::from_str(&body).unwrap();
            let offline = embedded.dashboard(&city.name, units).unwrap();

            assert_eq!(
                comparable(&serde_json::to_value(&served).unwrap()),
                comparable(&serde_json::to_value(&offline).unwrap()),
                "{} {:?}",
                city.name,
                units
            );
        }
    }
}

#[tokio::test]
async fn test_snapshot_keeps_raw_values() {
    let source = FixedSource::october();
    let city = &default_cities()[0];
    let direct = source.fetch_city(city).await;
    let snapshot = collect_snapshot(&source, &default_cities(), "Louisville, KY").await;
    let embedded = extract_snapshot(&render_document(&snapshot, &images()).unwrap()).unwrap();

    let weather = embedded.city(&city.name).unwrap();
    assert_eq!(weather.history, direct.history);
    assert_eq!(weather.forecast, direct.forecast);
    let view = |weather| {
        let dashboard = build_dashboard(weather, UnitPreferences::default());
        comparable(&serde_json::to_value(dashboard).unwrap())
    };
    assert_eq!(view(weather), view(&direct));
}
