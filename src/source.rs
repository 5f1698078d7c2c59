//! Where region data comes from, and the all-or-nothing initial load.

use crate::config::MapConfig;
use crate::error::LoadError;
use crate::geometry::{RegionBoundary, parse_boundaries};
use crate::models::{GeoGuess, RegionMeta};
use std::path::{Path, PathBuf};
use std::thread::ScopedJoinHandle;

/// The three resources the map needs before it can render.
pub trait RegionSource: Sync {
    fn regions(&self) -> Result<Vec<RegionMeta>, LoadError>;
    fn boundaries(&self) -> Result<Vec<RegionBoundary>, LoadError>;
    fn guess(&self) -> Result<GeoGuess, LoadError>;
}

/// Everything fetched by [`load_all`].
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub regions: Vec<RegionMeta>,
    pub boundaries: Vec<RegionBoundary>,
    pub guess: Option<GeoGuess>,
}

/// Fetch metadata, boundaries and (optionally) the location guess concurrently.
///
/// Fails as a whole if any single request fails; there is no partial result.
pub fn load_all<S>(source: &S, with_guess: bool) -> Result<LoadedData, LoadError>
where
    S: RegionSource + ?Sized,
{
    std::thread::scope(|scope| {
        let regions = scope.spawn(|| source.regions());
        let boundaries = scope.spawn(|| source.boundaries());
        let guess = with_guess.then(|| scope.spawn(|| source.guess()));

        let regions = join(regions)?;
        let boundaries = join(boundaries)?;
        let guess = guess.map(join).transpose()?;
        log::info!(
            "loaded {} regions, {} boundaries{}",
            regions.len(),
            boundaries.len(),
            match guess.as_ref().and_then(GeoGuess::slug) {
                Some(slug) => format!(", guessed {slug}"),
                None => String::new(),
            }
        );
        Ok(LoadedData {
            regions,
            boundaries,
            guess,
        })
    })
}

fn join<T>(handle: ScopedJoinHandle<'_, Result<T, LoadError>>) -> Result<T, LoadError> {
    handle.join().map_err(|_| LoadError::Worker)?
}

/// Build the source the configuration points at.
pub fn open_source(config: &MapConfig) -> Result<Box<dyn RegionSource + Send>, LoadError> {
    match &config.data_dir {
        Some(dir) => Ok(Box::new(DirectorySource::new(dir))),
        None => Ok(Box::new(crate::api::Client::from_config(config)?)),
    }
}

/// Load with the source and guess setting from `config`.
pub fn load_from_config(config: &MapConfig) -> Result<LoadedData, LoadError> {
    let source = open_source(config)?;
    load_all(source.as_ref(), config.guess_location)
}

/// Region data kept on disk, laid out like the backend's data folder.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub const REGIONS_FILE: &'static str = "counties.json";
    pub const BOUNDARIES_FILE: &'static str = "ireland_counties.geojson";
    /// Optional; a missing file means "no guess".
    pub const GUESS_FILE: &'static str = "me.json";

    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn read(&self, name: &str) -> Result<String, LoadError> {
        let path = self.dir.join(name);
        std::fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

impl RegionSource for DirectorySource {
    fn regions(&self) -> Result<Vec<RegionMeta>, LoadError> {
        let text = self.read(Self::REGIONS_FILE)?;
        serde_json::from_str(&text).map_err(|source| LoadError::Decode {
            what: "region metadata",
            source,
        })
    }

    fn boundaries(&self) -> Result<Vec<RegionBoundary>, LoadError> {
        parse_boundaries(&self.read(Self::BOUNDARIES_FILE)?)
    }

    fn guess(&self) -> Result<GeoGuess, LoadError> {
        let path = self.dir.join(Self::GUESS_FILE);
        if !path.exists() {
            return Ok(GeoGuess::default());
        }
        let text = self.read(Self::GUESS_FILE)?;
        serde_json::from_str(&text).map_err(|source| LoadError::Decode {
            what: "location guess",
            source,
        })
    }
}
