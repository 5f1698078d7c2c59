//! The region map controller: owns the display state and the loaded data and
//! turns user input into calls on a [`MapSurface`].
//!
//! All methods run on the UI thread and never block. The only fallible step,
//! fetching data, happens before [`RegionMapController::load`] is called.
//!
//! ```rust
//! use explore_islands::{MapConfig, RegionMapController};
//! use explore_islands::surface::HeadlessSurface;
//! use explore_islands::style::FillMode;
//!
//! let mut map = RegionMapController::new(HeadlessSurface::new(), MapConfig::default());
//! map.set_fill_mode(FillMode::Colours);
//! assert!(map.is_active_mode(FillMode::Colours));
//! assert_eq!(map.focus_group("Munster"), None); // nothing loaded yet
//! ```

use crate::config::MapConfig;
use crate::geometry::{Bounds, LonLat, RegionBoundary};
use crate::groups::{distinct_groups, select_group};
use crate::models::RegionMeta;
use crate::source::LoadedData;
use crate::style::{
    DisplayState, FillMode, OverlayCategory, highlight_style, resolve_style, tooltip_for,
};
use crate::surface::MapSurface;
use crate::touch::{TapDebounce, TapOutcome};
use ahash::AHashMap;
use std::time::Instant;

/// Kind of pointer that produced a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Unknown slug, or the region group is not on the map.
    Ignored,
    /// First touch tap; waiting for a second one.
    Preview,
    Navigated(String),
}

pub struct RegionMapController<S: MapSurface> {
    surface: S,
    config: MapConfig,
    state: DisplayState,
    meta: AHashMap<String, RegionMeta>,
    /// Metadata in payload order, for stable group listings.
    meta_order: Vec<String>,
    regions: Vec<RegionBoundary>,
    touch: TapDebounce,
    hovered: Option<String>,
    guessed: Option<String>,
    loaded: bool,
}

impl<S: MapSurface> RegionMapController<S> {
    /// Bootstrap the view and base layer. No regions yet.
    pub fn new(mut surface: S, config: MapConfig) -> Self {
        surface.set_view(&config.initial_view);
        surface.add_base_layer(&config.base_layer);
        let touch = TapDebounce::new(config.touch_window());
        Self {
            surface,
            config,
            state: DisplayState::default(),
            meta: AHashMap::new(),
            meta_order: Vec::new(),
            regions: Vec::new(),
            touch,
            hovered: None,
            guessed: None,
            loaded: false,
        }
    }

    /// Install freshly loaded data. Replaces anything loaded before.
    pub fn load(&mut self, data: LoadedData) {
        if self.loaded {
            self.teardown();
        }
        for m in data.regions {
            if !self.meta.contains_key(&m.slug) {
                self.meta_order.push(m.slug.clone());
            }
            self.meta.insert(m.slug.clone(), m);
        }
        for boundary in &data.boundaries {
            if !self.meta.contains_key(&boundary.slug) {
                log::debug!("no metadata for {}; using the default style", boundary.slug);
            }
            self.surface.add_region(boundary);
        }
        self.regions = data.boundaries;
        self.loaded = true;

        if self.state.overlay.shows_regions() {
            self.surface.attach_regions();
        }
        self.restyle_all();

        let guessed = data.guess.as_ref().and_then(|g| g.slug());
        if let Some(slug) = guessed {
            match self.region(slug) {
                Some(r) => {
                    let bounds = r.bounds;
                    self.surface.fit_bounds(bounds, self.config.focus_padding);
                    self.guessed = Some(slug.to_owned());
                }
                None => log::debug!("guessed region {slug} has no boundary"),
            }
        }
    }

    /// Drop all regions and per-region state. The display toggles survive.
    pub fn teardown(&mut self) {
        if let Some(slug) = self.hovered.take() {
            self.surface.close_tooltip(&slug);
        }
        self.surface.detach_regions();
        self.surface.clear_regions();
        self.meta.clear();
        self.meta_order.clear();
        self.regions.clear();
        self.touch.clear();
        self.guessed = None;
        self.loaded = false;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn regions(&self) -> &[RegionBoundary] {
        &self.regions
    }

    pub fn region(&self, slug: &str) -> Option<&RegionBoundary> {
        self.regions.iter().find(|r| r.slug == slug)
    }

    pub fn meta(&self, slug: &str) -> Option<&RegionMeta> {
        self.meta.get(slug)
    }

    /// Region framed on load from the location guess, if any.
    pub fn guessed_region(&self) -> Option<&str> {
        self.guessed.as_deref()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_active_mode(&self, mode: FillMode) -> bool {
        self.state.fill_mode == mode
    }

    pub fn is_active_overlay(&self, overlay: OverlayCategory) -> bool {
        self.state.overlay == overlay
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) {
        log::debug!("fill mode {} -> {mode}", self.state.fill_mode);
        self.state.fill_mode = mode;
        self.restyle_all();
    }

    pub fn set_overlay(&mut self, overlay: OverlayCategory) {
        log::debug!("overlay {} -> {overlay}", self.state.overlay);
        self.state.overlay = overlay;
        if overlay.shows_regions() {
            if self.loaded && !self.surface.regions_attached() {
                self.surface.attach_regions();
            }
            self.restyle_all();
        } else {
            if let Some(slug) = self.hovered.take() {
                self.surface.close_tooltip(&slug);
            }
            if self.surface.regions_attached() {
                self.surface.detach_regions();
            }
        }
    }

    /// Resting style of one region under the current state.
    fn restyle(&mut self, slug: &str) {
        let style = resolve_style(self.meta.get(slug), self.state);
        self.surface.apply_style(slug, &style);
    }

    fn restyle_all(&mut self) {
        for region in &self.regions {
            let style = resolve_style(self.meta.get(&region.slug), self.state);
            self.surface.apply_style(&region.slug, &style);
        }
    }

    /// Frame every region of the named group. Returns the bounds used, or
    /// `None` (and leaves the camera alone) when no region matches.
    pub fn focus_group(&mut self, name: &str) -> Option<Bounds> {
        let selection = select_group(&self.regions, &self.meta, name, self.config.group_match)?;
        log::debug!("focus {name}: {} regions", selection.slugs.len());
        self.surface
            .fit_bounds(selection.bounds, self.config.focus_padding);
        Some(selection.bounds)
    }

    /// Group labels for the group buttons, in metadata order.
    pub fn groups(&self) -> Vec<String> {
        distinct_groups(
            self.meta_order.iter().filter_map(|s| self.meta.get(s)),
            self.config.group_match,
        )
    }

    /// Topmost attached region under `p`.
    pub fn region_at(&self, p: LonLat) -> Option<&str> {
        if !self.surface.regions_attached() {
            return None;
        }
        self.regions
            .iter()
            .rev()
            .find(|r| r.contains(p))
            .map(|r| r.slug.as_str())
    }

    pub fn pointer_enter(&mut self, slug: &str) {
        if !self.state.overlay.shows_regions() {
            return;
        }
        if self.region(slug).is_none() {
            log::debug!("pointer entered unknown region {slug}");
            return;
        }
        self.hovered = Some(slug.to_owned());
        let Some(meta) = self.meta.get(slug) else {
            return;
        };
        let style = highlight_style(Some(meta));
        let tooltip = tooltip_for(meta);
        self.surface.apply_style(slug, &style);
        self.surface.open_tooltip(slug, &tooltip);
    }

    pub fn pointer_leave(&mut self, slug: &str) {
        if self.hovered.as_deref() == Some(slug) {
            self.hovered = None;
        }
        if self.region(slug).is_none() {
            return;
        }
        self.surface.close_tooltip(slug);
        self.restyle(slug);
    }

    /// Handle a click or tap on a region.
    ///
    /// Touch input needs two taps inside the touch window; anything else
    /// navigates straight away.
    pub fn click(&mut self, slug: &str, pointer: PointerKind, now: Instant) -> ClickOutcome {
        if !self.surface.regions_attached() || self.region(slug).is_none() {
            return ClickOutcome::Ignored;
        }
        if pointer == PointerKind::Touch && self.touch.tap(slug, now) == TapOutcome::Preview {
            return ClickOutcome::Preview;
        }
        let url = self.config.detail_url(slug);
        log::debug!("navigate {url}");
        self.surface.navigate(&url);
        ClickOutcome::Navigated(url)
    }

    /// Click at a map position: hit-test first, then [`Self::click`].
    pub fn click_at(&mut self, p: LonLat, pointer: PointerKind, now: Instant) -> ClickOutcome {
        match self.region_at(p).map(str::to_owned) {
            Some(slug) => self.click(&slug, pointer, now),
            None => ClickOutcome::Ignored,
        }
    }
}
