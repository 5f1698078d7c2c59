//! Region boundaries and the lon/lat boxes used for camera framing.

use crate::error::LoadError;
use geo::{BoundingRect, Contains, Geometry, MultiPolygon, Point, Rect};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Axis-aligned lon/lat box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west: west.min(east),
            south: south.min(north),
            east: west.max(east),
            north: south.max(north),
        }
    }

    pub fn from_rect(rect: Rect<f64>) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Grow in place so that `other` is covered too.
    pub fn extend(&mut self, other: &Bounds) {
        self.west = self.west.min(other.west);
        self.south = self.south.min(other.south);
        self.east = self.east.max(other.east);
        self.north = self.north.max(other.north);
    }

    pub fn union(mut self, other: &Bounds) -> Self {
        self.extend(other);
        self
    }

    pub fn contains(&self, other: &Bounds) -> bool {
        self.west <= other.west
            && self.south <= other.south
            && self.east >= other.east
            && self.north >= other.north
    }

    pub fn contains_point(&self, p: LonLat) -> bool {
        p.lon >= self.west && p.lon <= self.east && p.lat >= self.south && p.lat <= self.north
    }

    pub fn center(&self) -> LonLat {
        LonLat::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }
}

/// Screen padding applied around fitted bounds, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Padding {
    pub const fn uniform(px: u32) -> Self {
        Self { x: px, y: px }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::uniform(30)
    }
}

/// The polygonal outline of one region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionBoundary {
    pub slug: String,
    pub shape: MultiPolygon<f64>,
    pub bounds: Bounds,
}

impl RegionBoundary {
    /// `None` when the shape has no coordinates.
    pub fn new(slug: impl Into<String>, shape: MultiPolygon<f64>) -> Option<Self> {
        let bounds = Bounds::from_rect(shape.bounding_rect()?);
        Some(Self {
            slug: slug.into(),
            shape,
            bounds,
        })
    }

    /// Point-in-polygon test (holes excluded).
    pub fn contains(&self, p: LonLat) -> bool {
        self.bounds.contains_point(p) && self.shape.contains(&Point::new(p.lon, p.lat))
    }
}

/// Parse a GeoJSON document into one boundary per slugged polygonal feature.
pub fn parse_boundaries(text: &str) -> Result<Vec<RegionBoundary>, LoadError> {
    let gj = text
        .parse::<GeoJson>()
        .map_err(|e| LoadError::Geometry(e.to_string()))?;
    boundaries_from_geojson(gj)
}

pub fn boundaries_from_geojson(gj: GeoJson) -> Result<Vec<RegionBoundary>, LoadError> {
    let features = match gj {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => {
            return Err(LoadError::Geometry(
                "expected a FeatureCollection, found a bare geometry".into(),
            ));
        }
    };

    let mut out: Vec<RegionBoundary> = Vec::with_capacity(features.len());
    for feature in features {
        let Some(slug) = feature
            .property("slug")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
        else {
            log::warn!("skipping boundary feature without a slug property");
            continue;
        };
        let Some(gj_geom) = feature.geometry else {
            log::warn!("skipping boundary {slug}: no geometry");
            continue;
        };
        let geom: Geometry<f64> = gj_geom
            .value
            .try_into()
            .map_err(|e: geojson::Error| LoadError::Geometry(format!("{slug}: {e}")))?;
        let shape = match geom {
            Geometry::Polygon(p) => MultiPolygon(vec![p]),
            Geometry::MultiPolygon(m) => m,
            _ => {
                log::warn!("skipping boundary {slug}: geometry is not polygonal");
                continue;
            }
        };
        if out.iter().any(|b| b.slug == slug) {
            log::warn!("duplicate boundary for {slug}; keeping the first");
            continue;
        }
        match RegionBoundary::new(slug, shape) {
            Some(b) => out.push(b),
            None => log::warn!("skipping boundary with empty geometry"),
        }
    }
    Ok(out)
}
