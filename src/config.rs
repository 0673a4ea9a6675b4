//! Catalog configuration.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Artworks endpoint of the Art Institute of Chicago public API.
pub const DEFAULT_BASE_URL: &str = "https://api.artic.edu/api/v1/artworks";

/// Rows per page assumed until the first fetch reports the real size.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Fields the catalog table displays.
pub const ARTWORK_FIELDS: &[&str] = &[
    "id",
    "title",
    "place_of_origin",
    "artist_display",
    "inscriptions",
    "date_start",
    "date_end",
];

/// Catalog configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Endpoint pages are requested from.
    pub base_url: String,

    /// Explicit `limit` sent with each request (None = server default).
    pub page_size: Option<u32>,

    /// Fields requested from the server (empty = all).
    pub fields: Vec<String>,

    /// Per-request timeout.
    #[serde(rename = "request_timeout_secs", with = "secs")]
    pub request_timeout: Duration,

    /// Page size used for positions before any page has loaded.
    pub default_page_size: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: None,
            fields: ARTWORK_FIELDS.iter().map(|f| f.to_string()).collect(),
            request_timeout: Duration::from_secs(10),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: CatalogConfig =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no source could work with.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(CatalogError::Config("base_url is empty".into()));
        }
        if self.default_page_size == 0 {
            return Err(CatalogError::Config("default_page_size must be at least 1".into()));
        }
        if self.page_size == Some(0) {
            return Err(CatalogError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// Durations as fractional seconds.
mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
