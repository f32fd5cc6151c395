//! HTML documents for both hosts
//!
//! Both documents share one layout, stylesheet and drawing script. The
//! reactive shell pulls views from the JSON API; the snapshot embeds raw
//! weather data and converts units in the browser.

use serde::Serialize;

use crate::assets::PageImages;
use crate::models::City;
use crate::{Result, WeatherDashError};

const LAYOUT: &str = include_str!("page/layout.html");
const STYLE: &str = include_str!("page/style.css");
const RENDER_JS: &str = include_str!("page/render.js");
const MAP_JS: &str = include_str!("page/map.js");
const CONVERT_JS: &str = include_str!("page/convert.js");
const REACTIVE_JS: &str = include_str!("page/reactive.js");
const SNAPSHOT_JS: &str = include_str!("page/snapshot.js");

const DATA_OPEN: &str = r#"<script type="application/json" id="weather-data">"#;
const DATA_CLOSE: &str = "</script>";

/// Page for the reactive server
pub fn dashboard_shell(cities: &[City], default_city: &str, images: &PageImages) -> Result<String> {
    let scripts = [RENDER_JS, MAP_JS, REACTIVE_JS].join("\n");
    render_layout(cities, default_city, images, "", &scripts)
}

/// Self-contained snapshot page with `data` embedded as JSON
pub fn snapshot_document<T: Serialize>(
    data: &T,
    cities: &[City],
    default_city: &str,
    images: &PageImages,
) -> Result<String> {
    let embedded = format!("    {DATA_OPEN}{}{DATA_CLOSE}", embed_json(data)?);
    let scripts = [RENDER_JS, MAP_JS, CONVERT_JS, SNAPSHOT_JS].join("\n");
    render_layout(cities, default_city, images, &embedded, &scripts)
}

/// Pull the embedded JSON back out of a snapshot document
pub fn extract_embedded_json(document: &str) -> Result<&str> {
    let start = document
        .find(DATA_OPEN)
        .map(|i| i + DATA_OPEN.len())
        .ok_or_else(|| WeatherDashError::asset("Document has no embedded weather data"))?;
    let len = document[start..]
        .find(DATA_CLOSE)
        .ok_or_else(|| WeatherDashError::asset("Embedded weather data is not terminated"))?;
    Ok(&document[start..start + len])
}

fn render_layout(
    cities: &[City],
    default_city: &str,
    images: &PageImages,
    data: &str,
    scripts: &str,
) -> Result<String> {
    let options = city_options(cities, default_city);
    fill(
        LAYOUT,
        &[
            ("STYLE", STYLE),
            ("SEAL", images.seal.as_str()),
            ("SUN", images.sun.as_str()),
            ("RAIN", images.rain.as_str()),
            ("WIND", images.wind.as_str()),
            ("CITY_OPTIONS", options.as_str()),
            ("DATA", data),
            ("SCRIPTS", scripts),
        ],
    )
}

/// JSON safe to place inside a `<script>` element
fn embed_json<T: Serialize>(data: &T) -> Result<String> {
    let json = serde_json::to_string(data)
        .map_err(|e| WeatherDashError::asset(format!("Cannot serialize page data: {e}")))?;
    // `<` only occurs inside JSON strings, where < is equivalent
    Ok(json.replace('<', "\\u003c"))
}

fn city_options(cities: &[City], default_city: &str) -> String {
    cities
        .iter()
        .map(|city| {
            let name = escape_html(&city.name);
            let selected = if city.name == default_city { " selected" } else { "" };
            format!(r#"            <option value="{name}"{selected}>{name}</option>"#)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Single pass over `{{SLOT}}` markers. Slot values are never rescanned.
fn fill(template: &str, slots: &[(&str, &str)]) -> Result<String> {
    let slot_len: usize = slots.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + slot_len);
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| WeatherDashError::asset("Unterminated template slot"))?;
        let name = &after[..close];
        let value = slots
            .iter()
            .find(|(slot, _)| *slot == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| WeatherDashError::asset(format!("Unknown template slot '{name}'")))?;
        out.push_str(value);
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::placeholder_data_uri;
    use crate::models::city::default_cities;

    fn images() -> PageImages {
        PageImages {
            seal: placeholder_data_uri(),
            sun: placeholder_data_uri(),
            rain: placeholder_data_uri(),
            wind: placeholder_data_uri(),
        }
    }

    #[test]
    fn test_fill_slots_once() {
        let out = fill("a {{X}} b {{Y}}", &[("X", "{{Y}}"), ("Y", "2")]).unwrap();
        assert_eq!(out, "a {{Y}} b 2");
    }

    #[test]
    fn test_fill_unknown_slot() {
        assert!(fill("{{NOPE}}", &[]).is_err());
    }

    #[test]
    fn test_shell_has_no_leftover_slots() {
        let html = dashboard_shell(&default_cities(), "Lexington, KY", &images()).unwrap();
        assert!(!html.contains("{{"));
        assert!(html.contains(r#"<option value="Lexington, KY" selected>"#));
        assert!(html.contains("/api/dashboard"));
        assert!(!html.contains(DATA_OPEN));
    }

    #[test]
    fn test_snapshot_embeds_data() {
        let data = serde_json::json!({ "note": "</script><b>" });
        let html =
            snapshot_document(&data, &default_cities(), "Louisville, KY", &images()).unwrap();

        assert!(html.contains("function buildDashboard"));
        let embedded = extract_embedded_json(&html).unwrap();
        assert!(!embedded.contains('<'));
        let parsed: serde_json::Value = serde_json::from_str(embedded).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_city_names_are_escaped() {
        let cities = vec![City::new("Paducah <KY>", 37.0834, -88.6001)];
        let options = city_options(&cities, "Paducah <KY>");
        assert!(options.contains("Paducah &lt;KY&gt;"));
        assert!(options.contains("selected"));
    }
}
