mod common;

use explore_islands::groups::GroupMatch;
use explore_islands::style::OverlayCategory;
use explore_islands::{MapConfig, Padding};

#[test]
fn munster_frames_cork_and_kerry_only() {
    let mut map = common::controller();
    let bounds = map.focus_group("Munster").expect("munster has regions");

    let cork = map.region("cork").unwrap().bounds;
    let kerry = map.region("kerry").unwrap().bounds;
    let dublin = map.region("dublin").unwrap().bounds;
    assert!(bounds.contains(&cork));
    assert!(bounds.contains(&kerry));
    assert!(!bounds.contains(&dublin));
    assert_eq!(bounds.west, -10.5);
    assert_eq!(bounds.east, -8.0);

    let moves = map.surface().camera_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0], (bounds, Padding::uniform(30)));
}

#[test]
fn unknown_group_leaves_camera_alone() {
    let mut map = common::controller();
    assert_eq!(map.focus_group("NoSuchGroup"), None);
    assert_eq!(map.focus_group(""), None);
    assert!(map.surface().camera_moves().is_empty());
}

#[test]
fn matching_is_case_insensitive() {
    let mut map = common::controller();
    let a = map.focus_group("MUNSTER");
    let b = map.focus_group("munster");
    assert!(a.is_some());
    assert_eq!(a, b);
}

#[test]
fn whitespace_policy_decides_padded_labels() {
    let mut lenient = common::controller();
    let galway = lenient.region("galway").unwrap().bounds;
    assert_eq!(lenient.focus_group(" connacht "), Some(galway));

    let mut strict = common::controller_with(MapConfig {
        group_match: GroupMatch::Exact,
        ..MapConfig::default()
    });
    assert_eq!(strict.focus_group(" connacht "), None);
    assert_eq!(strict.focus_group("Connacht"), None);
    assert!(strict.surface().camera_moves().is_empty());
}

#[test]
fn focus_works_while_regions_are_hidden() {
    let mut map = common::controller();
    map.set_overlay(OverlayCategory::Geographic);
    assert!(map.focus_group("Leinster").is_some());
    assert_eq!(map.surface().camera_moves().len(), 1);
}

#[test]
fn custom_padding_is_passed_through() {
    let mut map = common::controller_with(MapConfig {
        focus_padding: Padding { x: 10, y: 40 },
        ..MapConfig::default()
    });
    map.focus_group("Leinster");
    assert_eq!(map.surface().camera_moves()[0].1, Padding { x: 10, y: 40 });
}

#[test]
fn groups_are_listed_once_in_payload_order() {
    let map = common::controller();
    assert_eq!(map.groups(), vec!["Munster", "Leinster", "Connacht"]);
}

#[test]
fn nothing_loaded_means_no_groups() {
    let mut map = common::controller();
    map.teardown();
    assert!(map.groups().is_empty());
    assert_eq!(map.focus_group("Munster"), None);
}
