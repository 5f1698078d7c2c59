mod common;

use explore_islands::style::{FillMode, OverlayCategory, StyleSpec, WHITE};
use explore_islands::surface::{HeadlessSurface, MapSurface};
use explore_islands::RegionMapController;

fn snapshot(map: &RegionMapController<HeadlessSurface>) -> Vec<(String, StyleSpec)> {
    let surface = map.surface();
    surface
        .layers()
        .iter()
        .map(|slug| (slug.clone(), surface.style(slug).cloned().unwrap()))
        .collect()
}

#[test]
fn load_attaches_and_styles_every_boundary() {
    let map = common::controller();
    let surface = map.surface();
    assert!(surface.regions_attached());
    assert_eq!(surface.layers().len(), 5);
    for slug in surface.layers() {
        assert_eq!(surface.style(slug).unwrap().color, WHITE);
    }
    assert!(surface.view().is_some());
    assert!(surface.base_layer().is_some());
}

#[test]
fn fill_mode_round_trip_restores_styles() {
    let mut map = common::controller();
    let before = snapshot(&map);

    map.set_fill_mode(FillMode::Colours);
    let colours = snapshot(&map);
    assert_ne!(before, colours);
    assert_eq!(map.surface().style("cork").unwrap().fill_color, "#ff0000");

    map.set_fill_mode(FillMode::Outline);
    assert_eq!(snapshot(&map), before);
}

#[test]
fn geographic_round_trip_restores_styles() {
    let mut map = common::controller();
    map.set_fill_mode(FillMode::Colours);
    let before = snapshot(&map);

    map.set_overlay(OverlayCategory::Geographic);
    assert!(!map.surface().regions_attached());

    map.set_overlay(OverlayCategory::Political);
    assert!(map.surface().regions_attached());
    assert_eq!(snapshot(&map), before);

    // Repeat to make sure nothing drifts.
    for _ in 0..3 {
        map.set_overlay(OverlayCategory::Geographic);
        map.set_overlay(OverlayCategory::Cultural);
    }
    assert_eq!(snapshot(&map), before);
}

#[test]
fn fill_mode_change_under_geographic_keeps_regions_hidden() {
    let mut map = common::controller();
    map.set_overlay(OverlayCategory::Geographic);
    map.set_fill_mode(FillMode::Colours);
    assert!(!map.surface().regions_attached());
    assert!(map.surface().style("cork").unwrap().is_invisible());

    map.set_overlay(OverlayCategory::Political);
    assert_eq!(map.surface().style("cork").unwrap().color, "#ff0000");
}

#[test]
fn reentering_same_overlay_is_harmless() {
    let mut map = common::controller();
    let before = snapshot(&map);
    map.set_overlay(OverlayCategory::Political);
    map.set_overlay(OverlayCategory::Political);
    assert_eq!(snapshot(&map), before);
    assert!(map.surface().regions_attached());
}

#[test]
fn exactly_one_active_button_per_family() {
    let mut map = common::controller();
    map.set_fill_mode(FillMode::Colours);
    map.set_overlay(OverlayCategory::Cultural);
    let modes = FillMode::ALL
        .iter()
        .filter(|m| map.is_active_mode(**m))
        .count();
    let overlays = OverlayCategory::ALL
        .iter()
        .filter(|o| map.is_active_overlay(**o))
        .count();
    assert_eq!(modes, 1);
    assert_eq!(overlays, 1);
    assert!(map.is_active_overlay(OverlayCategory::Cultural));
}

#[test]
fn hover_highlights_and_leave_restores() {
    let mut map = common::controller();
    map.set_fill_mode(FillMode::Colours);
    let resting = map.surface().style("kerry").cloned().unwrap();

    map.pointer_enter("kerry");
    let hovered = map.surface().style("kerry").cloned().unwrap();
    assert_eq!(hovered.weight, 3.0);
    assert_eq!(hovered.color, "#006400");
    let (slug, tip) = map.surface().tooltip().unwrap();
    assert_eq!(slug, "kerry");
    assert_eq!(tip.title, "Kerry");
    assert_eq!(tip.body, "Green / Gold");

    map.pointer_leave("kerry");
    assert!(map.surface().tooltip().is_none());
    assert_eq!(map.surface().style("kerry"), Some(&resting));
}

#[test]
fn tooltip_falls_back_to_group_label() {
    let mut map = common::controller();
    map.pointer_enter("galway");
    let (_, tip) = map.surface().tooltip().unwrap();
    assert_eq!(tip.body.trim(), "Connacht");
}

#[test]
fn hover_is_ignored_under_geographic() {
    let mut map = common::controller();
    map.set_overlay(OverlayCategory::Geographic);
    let writes = map.surface().style_writes();
    map.pointer_enter("cork");
    assert!(map.surface().tooltip().is_none());
    assert_eq!(map.surface().style_writes(), writes);
}

#[test]
fn region_without_metadata_never_panics() {
    let mut map = common::controller();
    for mode in FillMode::ALL {
        map.set_fill_mode(mode);
        let style = map.surface().style("mystery").unwrap();
        assert_eq!(style.color, WHITE);
    }
    map.pointer_enter("mystery");
    assert!(map.surface().tooltip().is_none());
    map.pointer_leave("mystery");
    map.pointer_enter("not-a-region");
    map.pointer_leave("not-a-region");
}

#[test]
fn teardown_clears_regions_but_keeps_toggles() {
    let mut map = common::controller();
    map.set_fill_mode(FillMode::Colours);
    map.teardown();
    assert!(!map.is_loaded());
    assert!(map.surface().layers().is_empty());
    assert!(map.regions().is_empty());
    assert!(map.is_active_mode(FillMode::Colours));

    map.load(common::loaded(None));
    assert_eq!(map.surface().style("dublin").unwrap().color, "#0000ff");
}
