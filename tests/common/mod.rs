//! Shared fixtures: four counties in three provinces plus one boundary with
//! no metadata.
#![allow(dead_code)]

use explore_islands::geometry::parse_boundaries;
use explore_islands::source::LoadedData;
use explore_islands::surface::HeadlessSurface;
use explore_islands::{GeoGuess, MapConfig, RegionMapController, RegionMeta};
use std::fs;
use std::path::Path;

pub const COUNTIES_JSON: &str = r##"[
  {"slug":"cork","name":"Cork","primary_colour":"#ff0000","colours":["Red","White"],"province":"Munster"},
  {"slug":"kerry","name":"Kerry","primary_colour":"#006400","colours":["Green","Gold"],"province":"munster"},
  {"slug":"dublin","name":"Dublin","primary_colour":"#0000ff","colours":["Sky Blue","Navy"],"province":"Leinster"},
  {"slug":"galway","name":"Galway","primary_colour":null,"colours":[],"province_or_region":"  Connacht "}
]"##;

/// GeoJSON feature for an axis-aligned box.
pub fn square(slug: &str, w: f64, s: f64, e: f64, n: f64) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{"slug":"{slug}"}},"geometry":{{"type":"Polygon","coordinates":[[[{w},{s}],[{e},{s}],[{e},{n}],[{w},{n}],[{w},{s}]]]}}}}"#
    )
}

pub fn boundaries_json() -> String {
    let features = [
        square("cork", -9.0, 51.5, -8.0, 52.2),
        square("kerry", -10.5, 51.6, -9.2, 52.5),
        square("dublin", -6.5, 53.2, -6.0, 53.6),
        square("galway", -10.2, 53.0, -8.0, 53.7),
        square("mystery", -7.5, 54.0, -7.0, 54.5),
    ];
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

pub fn regions() -> Vec<RegionMeta> {
    serde_json::from_str(COUNTIES_JSON).unwrap()
}

pub fn loaded(guess: Option<&str>) -> LoadedData {
    LoadedData {
        regions: regions(),
        boundaries: parse_boundaries(&boundaries_json()).unwrap(),
        guess: Some(GeoGuess {
            ip: Some("127.0.0.1".into()),
            guessed_county: guess.map(str::to_owned),
            confidence: Some(0.2),
        }),
    }
}

pub fn controller_with(config: MapConfig) -> RegionMapController<HeadlessSurface> {
    let mut map = RegionMapController::new(HeadlessSurface::new(), config);
    map.load(loaded(None));
    map
}

pub fn controller() -> RegionMapController<HeadlessSurface> {
    controller_with(MapConfig::default())
}

/// Lay out a data folder the way `DirectorySource` expects.
pub fn write_data_dir(dir: &Path, guess: Option<&str>) {
    fs::write(dir.join("counties.json"), COUNTIES_JSON).unwrap();
    fs::write(dir.join("ireland_counties.geojson"), boundaries_json()).unwrap();
    if let Some(slug) = guess {
        fs::write(
            dir.join("me.json"),
            format!(r#"{{"ip":"127.0.0.1","guessed_county":"{slug}","confidence":0.2}}"#),
        )
        .unwrap();
    }
}
