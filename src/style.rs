//! Display toggles and the pure mapping from toggles + metadata to a path style.
//!
//! A region's resting style depends only on the [`DisplayState`] and its
//! [`RegionMeta`]. Nothing here touches the map; applying a style is the job of
//! [`crate::surface::MapSurface::apply_style`].
//!
//! # Example
//!
//! ```rust
//! use explore_islands::style::{resolve_style, DisplayState, FillMode, OverlayCategory};
//!
//! let state = DisplayState { fill_mode: FillMode::Colours, overlay: OverlayCategory::Political };
//! let style = resolve_style(None, state);
//! assert_eq!(style.color, "#ffffff");
//! assert_eq!(style.fill_opacity, 0.18);
//! ```

use crate::models::RegionMeta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WHITE: &str = "#ffffff";
pub const TRANSPARENT: &str = "transparent";

pub const OUTLINE_WEIGHT: f32 = 1.5;
pub const COLOURS_WEIGHT: f32 = 1.8;
pub const COLOURS_FILL_OPACITY: f32 = 0.18;
pub const HIGHLIGHT_WEIGHT: f32 = 3.0;
pub const HIGHLIGHT_FILL_OPACITY: f32 = 0.3;

/// How regions are drawn at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    #[default]
    Outline,
    Colours,
}

/// Which overlay the map shows. `Cultural` currently draws like `Political`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayCategory {
    #[default]
    Political,
    Cultural,
    Geographic,
}

impl FillMode {
    pub const ALL: [FillMode; 2] = [FillMode::Outline, FillMode::Colours];

    /// Value of the `data-mode` button attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            FillMode::Outline => "outline",
            FillMode::Colours => "colours",
        }
    }
}

impl OverlayCategory {
    pub const ALL: [OverlayCategory; 3] = [
        OverlayCategory::Political,
        OverlayCategory::Cultural,
        OverlayCategory::Geographic,
    ];

    /// Value of the `data-overlay` button attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            OverlayCategory::Political => "political",
            OverlayCategory::Cultural => "cultural",
            OverlayCategory::Geographic => "geographic",
        }
    }

    /// Whether the boundary group is on the map in this category.
    pub fn shows_regions(self) -> bool {
        self != OverlayCategory::Geographic
    }
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl fmt::Display for OverlayCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

impl FromStr for FillMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outline" => Ok(FillMode::Outline),
            "colours" | "colors" => Ok(FillMode::Colours),
            other => Err(format!("unknown fill mode: {other}")),
        }
    }
}

impl FromStr for OverlayCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "political" => Ok(OverlayCategory::Political),
            "cultural" => Ok(OverlayCategory::Cultural),
            "geographic" => Ok(OverlayCategory::Geographic),
            other => Err(format!("unknown overlay category: {other}")),
        }
    }
}

/// The two display toggles. Any change triggers a full restyle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayState {
    pub fill_mode: FillMode,
    pub overlay: OverlayCategory,
}

/// Path style applied to one region layer.
///
/// Colours are CSS colour strings, passed through to the surface untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub color: String,
    pub weight: f32,
    pub opacity: f32,
    pub fill_color: String,
    pub fill_opacity: f32,
}

impl StyleSpec {
    /// Nothing is drawn: stroke and fill both have zero opacity.
    pub fn is_invisible(&self) -> bool {
        self.opacity == 0.0 && self.fill_opacity == 0.0
    }

    fn outline() -> Self {
        Self {
            color: WHITE.into(),
            weight: OUTLINE_WEIGHT,
            opacity: 1.0,
            fill_color: TRANSPARENT.into(),
            fill_opacity: 0.0,
        }
    }

    fn hidden() -> Self {
        Self {
            color: TRANSPARENT.into(),
            weight: 0.0,
            opacity: 0.0,
            fill_color: TRANSPARENT.into(),
            fill_opacity: 0.0,
        }
    }
}

/// Style a region layer starts with, before metadata is consulted.
impl Default for StyleSpec {
    fn default() -> Self {
        Self::outline()
    }
}

fn primary_or_white(meta: Option<&RegionMeta>) -> String {
    meta.and_then(RegionMeta::colour).unwrap_or(WHITE).to_string()
}

/// Resting (non-hovered) style of a region.
pub fn resolve_style(meta: Option<&RegionMeta>, state: DisplayState) -> StyleSpec {
    if state.overlay == OverlayCategory::Geographic {
        return StyleSpec::hidden();
    }
    match state.fill_mode {
        FillMode::Colours => {
            let colour = primary_or_white(meta);
            StyleSpec {
                color: colour.clone(),
                weight: COLOURS_WEIGHT,
                opacity: 1.0,
                fill_color: colour,
                fill_opacity: COLOURS_FILL_OPACITY,
            }
        }
        FillMode::Outline => StyleSpec::outline(),
    }
}

/// Style shown while the pointer is over a region.
pub fn highlight_style(meta: Option<&RegionMeta>) -> StyleSpec {
    let colour = primary_or_white(meta);
    StyleSpec {
        color: colour.clone(),
        weight: HIGHLIGHT_WEIGHT,
        opacity: 1.0,
        fill_color: colour,
        fill_opacity: HIGHLIGHT_FILL_OPACITY,
    }
}

/// Hover tooltip content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub title: String,
    pub body: String,
}

pub fn tooltip_for(meta: &RegionMeta) -> Tooltip {
    let body = if meta.colours.is_empty() {
        meta.group().unwrap_or_default().to_string()
    } else {
        meta.colours.join(" / ")
    };
    Tooltip {
        title: meta.name.clone(),
        body,
    }
}

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a handful of CSS names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "transparent" => return Some(Self::TRANSPARENT),
            "white" => return Some(Self::WHITE),
            "black" => return Some(Self::rgb(0, 0, 0)),
            "red" => return Some(Self::rgb(255, 0, 0)),
            "green" => return Some(Self::rgb(0, 128, 0)),
            "blue" => return Some(Self::rgb(0, 0, 255)),
            "yellow" => return Some(Self::rgb(255, 255, 0)),
            _ => {}
        }
        let hex = s.strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Scale alpha by an opacity in `0..=1`.
    pub fn with_opacity(self, opacity: f32) -> Self {
        let a = (self.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}
