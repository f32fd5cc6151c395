//! Header images, inlined into the page as data URIs

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// 1x1 transparent PNG used when an image file is missing
const PLACEHOLDER_PNG: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub const SEAL_FILE: &str = "Seal_of_Kentucky.png";
pub const SUN_FILE: &str = "sun.png";
pub const RAIN_FILE: &str = "rain.png";
pub const WIND_FILE: &str = "wind.png";

/// Data URIs for every image the dashboard shows
#[derive(Debug, Clone, Serialize)]
pub struct PageImages {
    pub seal: String,
    pub sun: String,
    pub rain: String,
    pub wind: String,
}

impl PageImages {
    /// Read all images from `dir`, substituting the placeholder for any that
    /// cannot be read
    #[must_use]
    pub fn load(dir: &Path) -> Self {
        Self {
            seal: load_data_uri(dir, SEAL_FILE),
            sun: load_data_uri(dir, SUN_FILE),
            rain: load_data_uri(dir, RAIN_FILE),
            wind: load_data_uri(dir, WIND_FILE),
        }
    }
}

#[must_use]
pub fn placeholder_data_uri() -> String {
    format!("data:image/png;base64,{PLACEHOLDER_PNG}")
}

/// Loads an image and returns its content as a base64-encoded data URI
#[must_use]
pub fn load_data_uri(dir: &Path, file_name: &str) -> String {
    let path = dir.join(file_name);
    match fs::read(&path) {
        Ok(bytes) => {
            debug!("Inlined {} ({} bytes)", path.display(), bytes.len());
            format!("data:{};base64,{}", mime_type(&path), STANDARD.encode(&bytes))
        }
        Err(e) => {
            warn!(
                "Image {} unavailable ({}), using placeholder",
                path.display(),
                e
            );
            placeholder_data_uri()
        }
    }
}

fn mime_type(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("svg") => "image/svg+xml",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
