//! explore_islands
//!
//! An interactive choropleth map of Irish counties and UK/Ireland regions.
//! Pairs with the `islands` CLI and the `islands-gui` desktop viewer.
//!
//! ### Features
//! - Load region metadata, boundary geometry and a location guess concurrently,
//!   from a backend or a local data folder
//! - Outline / colour fill modes and political / cultural / geographic overlays
//! - Hover highlight with tooltips, click (or double tap) to open a region page
//! - Frame a whole province or region group in one call
//!
//! ### Example
//! ```no_run
//! use explore_islands::{MapConfig, RegionMapController, source};
//! use explore_islands::surface::HeadlessSurface;
//! use explore_islands::style::FillMode;
//!
//! let config = MapConfig::default();
//! let data = source::load_from_config(&config)?;
//! let mut map = RegionMapController::new(HeadlessSurface::new(), config);
//! map.load(data);
//! map.set_fill_mode(FillMode::Colours);
//! if let Some(bounds) = map.focus_group("Munster") {
//!     println!("{:?}", bounds);
//! }
//! # Ok::<(), explore_islands::LoadError>(())
//! ```

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod groups;
pub mod models;
pub mod source;
pub mod style;
pub mod surface;
pub mod touch;
pub mod viewport;

pub use api::Client;
pub use config::MapConfig;
pub use controller::{ClickOutcome, PointerKind, RegionMapController};
pub use error::LoadError;
pub use geometry::{Bounds, LonLat, Padding, RegionBoundary};
pub use models::{GeoGuess, RegionMeta};
