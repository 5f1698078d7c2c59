//! The map rendering surface the controller drives.
//!
//! Tiling, projection and painting belong to whatever implements
//! [`MapSurface`]. The controller only tells it what to show.
//! [`HeadlessSurface`] records every call and backs the CLI and the tests.

use crate::geometry::{Bounds, LonLat, Padding, RegionBoundary};
use crate::style::{StyleSpec, Tooltip};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Initial camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub center: LonLat,
    pub zoom: f64,
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self {
            center: LonLat::new(-8.0, 53.4),
            zoom: 7.0,
        }
    }
}

/// Raster basemap the surface draws under the regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayer {
    /// `{s}`/`{z}`/`{x}`/`{y}`/`{r}` URL template.
    pub url_template: String,
    pub max_zoom: u8,
}

impl Default for BaseLayer {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png".into(),
            max_zoom: 18,
        }
    }
}

pub trait MapSurface {
    fn set_view(&mut self, view: &ViewSpec);
    fn add_base_layer(&mut self, layer: &BaseLayer);

    /// Register one interactive layer. It starts detached.
    fn add_region(&mut self, boundary: &RegionBoundary);
    /// Drop every region layer.
    fn clear_regions(&mut self);

    /// Put the region group on the map.
    fn attach_regions(&mut self);
    /// Take the region group off the map; its layers stop receiving input.
    fn detach_regions(&mut self);
    fn regions_attached(&self) -> bool;

    fn apply_style(&mut self, slug: &str, style: &StyleSpec);

    /// Sticky tooltip that follows the cursor.
    fn open_tooltip(&mut self, slug: &str, tooltip: &Tooltip);
    fn close_tooltip(&mut self, slug: &str);

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding);

    /// Leave the map for a detail page.
    fn navigate(&mut self, url: &str);
}

/// A surface without a screen: keeps the last applied state and logs moves.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    view: Option<ViewSpec>,
    base_layer: Option<BaseLayer>,
    layers: Vec<String>,
    styles: AHashMap<String, StyleSpec>,
    attached: bool,
    tooltip: Option<(String, Tooltip)>,
    camera_moves: Vec<(Bounds, Padding)>,
    navigations: Vec<String>,
    style_writes: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&ViewSpec> {
        self.view.as_ref()
    }

    pub fn base_layer(&self) -> Option<&BaseLayer> {
        self.base_layer.as_ref()
    }

    /// Slugs of the registered layers, in registration order.
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    pub fn style(&self, slug: &str) -> Option<&StyleSpec> {
        self.styles.get(slug)
    }

    pub fn tooltip(&self) -> Option<(&str, &Tooltip)> {
        self.tooltip.as_ref().map(|(s, t)| (s.as_str(), t))
    }

    pub fn camera_moves(&self) -> &[(Bounds, Padding)] {
        &self.camera_moves
    }

    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    pub fn style_writes(&self) -> usize {
        self.style_writes
    }
}

impl MapSurface for HeadlessSurface {
    fn set_view(&mut self, view: &ViewSpec) {
        self.view = Some(*view);
    }

    fn add_base_layer(&mut self, layer: &BaseLayer) {
        self.base_layer = Some(layer.clone());
    }

    fn add_region(&mut self, boundary: &RegionBoundary) {
        if !self.layers.contains(&boundary.slug) {
            self.layers.push(boundary.slug.clone());
        }
        self.styles
            .insert(boundary.slug.clone(), StyleSpec::default());
    }

    fn clear_regions(&mut self) {
        self.layers.clear();
        self.styles.clear();
        self.tooltip = None;
    }

    fn attach_regions(&mut self) {
        self.attached = true;
    }

    fn detach_regions(&mut self) {
        self.attached = false;
        self.tooltip = None;
    }

    fn regions_attached(&self) -> bool {
        self.attached
    }

    fn apply_style(&mut self, slug: &str, style: &StyleSpec) {
        if let Some(current) = self.styles.get_mut(slug) {
            *current = style.clone();
            self.style_writes += 1;
        }
    }

    fn open_tooltip(&mut self, slug: &str, tooltip: &Tooltip) {
        self.tooltip = Some((slug.to_owned(), tooltip.clone()));
    }

    fn close_tooltip(&mut self, slug: &str) {
        if self.tooltip.as_ref().is_some_and(|(s, _)| s == slug) {
            self.tooltip = None;
        }
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: Padding) {
        self.camera_moves.push((bounds, padding));
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_owned());
    }
}
