//! Dashboard view model
//!
//! Shapes one city's normalized rows into chart datasets, the wind gauge,
//! summary cards and table rows. When either range is empty every widget
//! switches to the no-data state together.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CityWeather, UnitPreferences};
use crate::normalize::{self, DisplayRow};

pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One named series over dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    /// Set instead of series when there is nothing to draw
    pub annotation: Option<String>,
}

/// Single-value indicator for the latest wind speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    pub title: String,
    pub value: Option<f64>,
    /// Axis ceiling, cosmetic only
    pub range_max: f64,
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: f64,
    /// `value` formatted with its unit
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitLabels {
    pub temperature: String,
    pub wind: String,
    pub precipitation: String,
}

impl From<UnitPreferences> for UnitLabels {
    fn from(units: UnitPreferences) -> Self {
        Self {
            temperature: units.temperature.label().to_string(),
            wind: units.wind.label().to_string(),
            precipitation: units.precipitation.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Everything the page needs to draw one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub city: String,
    pub units: UnitPreferences,
    pub labels: UnitLabels,
    pub fetched_at: DateTime<Utc>,
    /// Span of the historical rows; `None` without data
    pub date_range: Option<DisplayDateRange>,
    pub no_data: bool,
    pub forecast_chart: Chart,
    pub temperature_chart: Chart,
    pub humidity_chart: Chart,
    pub precipitation_chart: Chart,
    pub wind_gauge: Gauge,
    pub cards: Vec<SummaryCard>,
    /// Historical rows in display units
    pub table: Vec<DisplayRow>,
}

/// Build the dashboard for one city in the given units
#[must_use]
pub fn build_dashboard(weather: &CityWeather, units: UnitPreferences) -> Dashboard {
    let labels = UnitLabels::from(units);
    let titles = Titles::new(&weather.city.name, &labels);

    if weather.is_empty() {
        return Dashboard {
            city: weather.city.name.clone(),
            units,
            labels,
            fetched_at: weather.fetched_at,
            date_range: None,
            no_data: true,
            forecast_chart: empty_chart(ChartKind::Line, titles.forecast),
            temperature_chart: empty_chart(ChartKind::Line, titles.temperature),
            humidity_chart: empty_chart(ChartKind::Line, titles.humidity),
            precipitation_chart: empty_chart(ChartKind::Bar, titles.precipitation),
            wind_gauge: Gauge {
                title: titles.wind,
                value: None,
                range_max: units.wind.gauge_ceiling(),
                annotation: Some(NO_DATA.to_string()),
            },
            cards: Vec::new(),
            table: Vec::new(),
        };
    }

    let history = normalize::display_observations(&weather.history, units);
    let forecast = normalize::display_forecasts(&weather.forecast, units);

    let date_range = weather
        .history_range()
        .map(|(start, end)| DisplayDateRange { start, end });

    Dashboard {
        city: weather.city.name.clone(),
        units,
        fetched_at: weather.fetched_at,
        date_range,
        no_data: false,
        forecast_chart: temperature_chart(&forecast, titles.forecast),
        temperature_chart: temperature_chart(&history, titles.temperature),
        humidity_chart: Chart {
            kind: ChartKind::Line,
            series: vec![series("Humidity", &history, |row| {
                f64::from(row.humidity_pct.unwrap_or_default())
            })],
            ..titles.humidity
        },
        precipitation_chart: Chart {
            kind: ChartKind::Bar,
            series: vec![series("Precipitation", &history, |row| row.precip)],
            ..titles.precipitation
        },
        wind_gauge: Gauge {
            title: titles.wind,
            value: history.last().and_then(|row| row.wind),
            range_max: units.wind.gauge_ceiling(),
            annotation: None,
        },
        cards: summary_cards(&history, &labels),
        table: history,
        labels,
    }
}

/// Chart skeletons carrying titles and axis labels
struct Titles {
    forecast: Chart,
    temperature: Chart,
    humidity: Chart,
    precipitation: Chart,
    wind: String,
}

impl Titles {
    fn new(city: &str, labels: &UnitLabels) -> Self {
        let temp_axis = format!("Temp ({})", labels.temperature);
        Self {
            forecast: titled(
                format!("{city} 7-Day Forecast ({})", labels.temperature),
                temp_axis.clone(),
            ),
            temperature: titled(
                format!("Historical Temperatures ({})", labels.temperature),
                temp_axis,
            ),
            humidity: titled(
                "Historical Humidity (%)".to_string(),
                "Humidity (%)".to_string(),
            ),
            precipitation: titled(
                format!("Historical Precipitation ({})", labels.precipitation),
                format!("Precipitation ({})", labels.precipitation),
            ),
            wind: format!("Latest Wind Speed ({})", labels.wind),
        }
    }
}

fn titled(title: String, y_label: String) -> Chart {
    Chart {
        kind: ChartKind::Line,
        title,
        x_label: "Date".to_string(),
        y_label,
        series: Vec::new(),
        annotation: None,
    }
}

fn empty_chart(kind: ChartKind, skeleton: Chart) -> Chart {
    Chart {
        kind,
        annotation: Some(NO_DATA.to_string()),
        ..skeleton
    }
}

fn temperature_chart(rows: &[DisplayRow], skeleton: Chart) -> Chart {
    Chart {
        kind: ChartKind::Line,
        series: vec![
            series("Max Temp", rows, |row| row.temp_max),
            series("Min Temp", rows, |row| row.temp_min),
        ],
        ..skeleton
    }
}

fn series(name: &str, rows: &[DisplayRow], value: impl Fn(&DisplayRow) -> f64) -> Series {
    Series {
        name: name.to_string(),
        x: rows.iter().map(|row| row.date).collect(),
        y: rows.iter().map(value).collect(),
    }
}

/// Max of max-temp, min of min-temp, total precipitation, mean wind
fn summary_cards(history: &[DisplayRow], labels: &UnitLabels) -> Vec<SummaryCard> {
    let max_temp = history
        .iter()
        .map(|row| row.temp_max)
        .fold(f64::NEG_INFINITY, f64::max);
    let min_temp = history
        .iter()
        .map(|row| row.temp_min)
        .fold(f64::INFINITY, f64::min);
    let total_precip: f64 = history.iter().map(|row| row.precip).sum();
    let winds: Vec<f64> = history.iter().filter_map(|row| row.wind).collect();
    let avg_wind = winds.iter().sum::<f64>() / winds.len().max(1) as f64;

    vec![
        SummaryCard {
            title: "Max Temp".to_string(),
            value: max_temp,
            display: format!("{}{}", fixed(max_temp, 1), labels.temperature),
        },
        SummaryCard {
            title: "Min Temp".to_string(),
            value: min_temp,
            display: format!("{}{}", fixed(min_temp, 1), labels.temperature),
        },
        SummaryCard {
            title: "Total Precip".to_string(),
            value: total_precip,
            display: format!("{} {}", fixed(total_precip, 2), labels.precipitation),
        },
        SummaryCard {
            title: "Avg Wind".to_string(),
            value: avg_wind,
            display: format!("{} {}", fixed(avg_wind, 1), labels.wind),
        },
    ]
}

/// Round half to even first, then print exactly `decimals` places
fn fixed(value: f64, decimals: usize) -> String {
    let rounded = normalize::round_to(value, decimals as i32);
    format!("{rounded:.decimals$}")
}
