//! Web Mercator camera math shared by on-screen surfaces.
//!
//! World pixel space follows the slippy-map convention: at zoom `z` the world
//! is `256 * 2^z` pixels square, origin at the north-west corner.

use crate::geometry::{Bounds, LonLat, Padding};
use crate::surface::ViewSpec;
use std::f64::consts::PI;

pub const TILE_SIZE: f64 = 256.0;
/// Latitude limit of the square Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM: f64 = 1.0;

fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Position in world pixels at `zoom`.
pub fn project(p: LonLat, zoom: f64) -> [f64; 2] {
    let size = world_size(zoom);
    let lat = p.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (p.lon + 180.0) / 360.0 * size;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * size;
    [x, y]
}

pub fn unproject(xy: [f64; 2], zoom: f64) -> LonLat {
    let size = world_size(zoom);
    let lon = xy[0] / size * 360.0 - 180.0;
    let n = PI * (1.0 - 2.0 * xy[1] / size);
    let lat = n.sinh().atan().to_degrees();
    LonLat::new(lon, lat)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LonLat,
    pub zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(view: &ViewSpec, max_zoom: f64) -> Self {
        let max_zoom = max_zoom.max(MIN_ZOOM);
        Self {
            center: view.center,
            zoom: view.zoom.clamp(MIN_ZOOM, max_zoom),
            max_zoom,
        }
    }

    /// Never below [`MIN_ZOOM`], so zoom clamping always has a valid range.
    pub fn set_max_zoom(&mut self, max_zoom: f64) {
        self.max_zoom = max_zoom.max(MIN_ZOOM);
        self.zoom = self.zoom.clamp(MIN_ZOOM, self.max_zoom);
    }

    /// Screen position (origin top-left) of `p` in a viewport of `size` pixels.
    pub fn to_screen(&self, p: LonLat, size: [f64; 2]) -> [f64; 2] {
        let c = project(self.center, self.zoom);
        let w = project(p, self.zoom);
        [w[0] - c[0] + size[0] / 2.0, w[1] - c[1] + size[1] / 2.0]
    }

    pub fn to_lonlat(&self, screen: [f64; 2], size: [f64; 2]) -> LonLat {
        let c = project(self.center, self.zoom);
        unproject(
            [screen[0] - size[0] / 2.0 + c[0], screen[1] - size[1] / 2.0 + c[1]],
            self.zoom,
        )
    }

    /// Move the camera by a screen-space drag.
    pub fn pan_by(&mut self, delta: [f64; 2]) {
        let c = project(self.center, self.zoom);
        self.center = unproject([c[0] - delta[0], c[1] - delta[1]], self.zoom);
    }

    /// Zoom around a screen anchor so the point under it stays put.
    pub fn zoom_around(&mut self, delta: f64, anchor: [f64; 2], size: [f64; 2]) {
        let before = self.to_lonlat(anchor, size);
        self.zoom = (self.zoom + delta).clamp(MIN_ZOOM, self.max_zoom);
        let after = self.to_screen(before, size);
        self.pan_by([anchor[0] - after[0], anchor[1] - after[1]]);
    }

    /// Largest whole zoom at which `bounds` fits inside `size` minus `padding`.
    pub fn fit(&mut self, bounds: &Bounds, padding: Padding, size: [f64; 2]) {
        let avail_w = (size[0] - 2.0 * padding.x as f64).max(1.0);
        let avail_h = (size[1] - 2.0 * padding.y as f64).max(1.0);

        let nw = project(LonLat::new(bounds.west, bounds.north), 0.0);
        let se = project(LonLat::new(bounds.east, bounds.south), 0.0);
        let span_w = (se[0] - nw[0]).abs();
        let span_h = (se[1] - nw[1]).abs();

        let zoom = if span_w <= f64::EPSILON && span_h <= f64::EPSILON {
            self.max_zoom
        } else {
            let scale = (avail_w / span_w.max(f64::EPSILON)).min(avail_h / span_h.max(f64::EPSILON));
            scale.log2().floor()
        };
        self.zoom = zoom.clamp(MIN_ZOOM, self.max_zoom);
        self.center = unproject([(nw[0] + se[0]) / 2.0, (nw[1] + se[1]) / 2.0], 0.0);
    }
}
