//! Runtime configuration shared by the CLI and the desktop viewer.
//!
//! Defaults match the stock backend layout. A JSON file can override any
//! subset of fields; command-line flags are applied on top by the binaries.

use crate::geometry::Padding;
use crate::groups::GroupMatch;
use crate::surface::{BaseLayer, ViewSpec};
use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// Allow -, _, . unescaped in slugs
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub base_url: String,
    pub regions_path: String,
    pub boundaries_path: String,
    pub guess_path: String,
    /// Ask the backend where the caller is and frame that region on load.
    pub guess_location: bool,
    /// Read the three resources from this directory instead of `base_url`.
    pub data_dir: Option<PathBuf>,
    /// Detail page path; `{slug}` is replaced by the percent-encoded slug.
    pub detail_path: String,
    pub group_match: GroupMatch,
    pub focus_padding: Padding,
    pub touch_window_ms: u64,
    pub initial_view: ViewSpec,
    pub base_layer: BaseLayer,
    pub request_timeout_secs: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            regions_path: "/api/counties/".into(),
            boundaries_path: "/static/data/ireland_counties.geojson".into(),
            guess_path: "/api/geo/me".into(),
            guess_location: true,
            data_dir: None,
            detail_path: "/region/{slug}".into(),
            group_match: GroupMatch::default(),
            focus_padding: Padding::default(),
            touch_window_ms: 800,
            initial_view: ViewSpec::default(),
            base_layer: BaseLayer::default(),
            request_timeout_secs: 30,
        }
    }
}

impl MapConfig {
    /// `<config dir>/explore-islands/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("explore-islands").join("config.json"))
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
    }

    /// Load `explicit` if given, else the default path if it exists, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(p) = explicit {
            return Self::from_json_file(p);
        }
        match Self::default_path() {
            Some(p) if p.is_file() => {
                log::debug!("using config {}", p.display());
                Self::from_json_file(p)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Detail page path for `slug`.
    pub fn detail_url(&self, slug: &str) -> String {
        let encoded = percent_encoding::utf8_percent_encode(slug.trim(), SAFE).to_string();
        self.detail_path.replace("{slug}", &encoded)
    }

    pub fn touch_window(&self) -> Duration {
        Duration::from_millis(self.touch_window_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
