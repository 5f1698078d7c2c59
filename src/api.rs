//! Synchronous client for the **Explore Islands backend**.
//!
//! Three endpoints feed the map:
//! - `GET /api/counties/`: region metadata list
//! - `GET /static/data/ireland_counties.geojson`: boundary FeatureCollection
//! - `GET /api/geo/me`: the caller's guessed region
//!
//! Paths and the base URL come from [`MapConfig`]. Any non-success status or
//! connection error fails the request on the first attempt; there is no retry.
//!
//! Typical usage:
//! ```no_run
//! # use explore_islands::{Client, MapConfig, source::load_all};
//! let client = Client::from_config(&MapConfig::default())?;
//! let data = load_all(&client, true)?;
//! println!("{} regions", data.regions.len());
//! # Ok::<(), explore_islands::LoadError>(())
//! ```
use crate::config::MapConfig;
use crate::error::LoadError;
use crate::geometry::{RegionBoundary, parse_boundaries};
use crate::models::{GeoGuess, RegionMeta};
use crate::source::RegionSource;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    regions_url: String,
    boundaries_url: String,
    guess_url: String,
    http: HttpClient,
}

impl Client {
    pub fn from_config(config: &MapConfig) -> Result<Self, LoadError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout()) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("explore_islands/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .map_err(LoadError::Client)?;
        Ok(Self {
            base_url: config.base_url.clone(),
            regions_url: config.url(&config.regions_path),
            boundaries_url: config.url(&config.boundaries_path),
            guess_url: config.url(&config.guess_path),
            http,
        })
    }

    /// GET `url` and return the body. Any non-success status fails at once.
    fn get_text(&self, url: &str) -> Result<String, LoadError> {
        let resp = self.http.get(url).send().map_err(|source| LoadError::Network {
            url: url.to_owned(),
            source,
        })?;
        let status = resp.status();
        if !status.is_success() {
            log::debug!("GET {url} -> {status}");
            return Err(LoadError::Http {
                url: url.to_owned(),
                status,
            });
        }
        resp.text().map_err(|source| LoadError::Network {
            url: url.to_owned(),
            source,
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &'static str) -> Result<T, LoadError> {
        let text = self.get_text(url)?;
        serde_json::from_str(&text).map_err(|source| LoadError::Decode { what, source })
    }
}

impl RegionSource for Client {
    fn regions(&self) -> Result<Vec<RegionMeta>, LoadError> {
        self.get_json(&self.regions_url, "region metadata")
    }

    fn boundaries(&self) -> Result<Vec<RegionBoundary>, LoadError> {
        parse_boundaries(&self.get_text(&self.boundaries_url)?)
    }

    fn guess(&self) -> Result<GeoGuess, LoadError> {
        self.get_json(&self.guess_url, "location guess")
    }
}
