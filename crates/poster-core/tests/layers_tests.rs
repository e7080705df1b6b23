//! Tests for layer spec construction: clipping, river overflow and tag filters.

use std::collections::BTreeMap;

use poster_common::{ClipShape, FeatureClass};
use poster_core::layers::{ClassFilter, RIVER_OVERFLOW_DILATION};
use poster_core::{DuplicateKeyPolicy, FilterTable, LayerSpecBuilder, StyleTable, TagPredicate, ThemeBuilder};

// ============================================================================
// Helper functions
// ============================================================================

fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ============================================================================
// Clipping and river overflow
// ============================================================================

#[test]
fn test_water_flags_for_every_combination() {
    let table = FilterTable::default();
    let builder = LayerSpecBuilder::new(&table);

    let cases = [
        (ClipShape::Square, false, false, 0.0),
        (ClipShape::Circle, false, true, 0.0),
        (ClipShape::Square, true, true, RIVER_OVERFLOW_DILATION),
        (ClipShape::Circle, true, false, RIVER_OVERFLOW_DILATION),
    ];
    for (shape, overflow, circle, dilate) in cases {
        let spec = builder.build(shape, overflow);
        let water = spec.get(FeatureClass::Water).unwrap();
        assert_eq!(water.circle, circle, "shape={} overflow={}", shape, overflow);
        assert_eq!(water.dilate, dilate, "shape={} overflow={}", shape, overflow);
    }
}

#[test]
fn test_overflow_only_touches_water() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Circle, true);
    for (class, rule) in spec.iter() {
        if class == FeatureClass::Water {
            continue;
        }
        assert!(rule.circle, "{} should follow the poster shape", class);
        assert_eq!(rule.dilate, 0.0, "{}", class);
    }
}

#[test]
fn test_dilation_constant() {
    assert_eq!(RIVER_OVERFLOW_DILATION, 100.0);
}

// ============================================================================
// Per-class flags
// ============================================================================

#[test]
fn test_buildings_are_not_unioned() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    assert!(!spec.get(FeatureClass::Building).unwrap().union);
    assert!(spec.get(FeatureClass::Park).unwrap().union);
}

#[test]
fn test_streets_carry_width_table() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    let streets = spec.get(FeatureClass::Streets).unwrap();
    let widths = streets.width.as_ref().unwrap();
    assert_eq!(widths["motorway"], 5.0);
    assert_eq!(widths["residential"], 3.0);
    assert_eq!(widths["footway"], 1.0);
    let selectors = streets.custom_filter.as_ref().unwrap();
    assert_eq!(selectors.len(), 1);
    assert!(selectors[0].starts_with("[\"highway\"~\""));
    assert!(spec.get(FeatureClass::Water).unwrap().width.is_none());
}

#[test]
fn test_every_layer_has_a_style() {
    let filters = FilterTable::default();
    let styles = StyleTable::default();
    let spec = LayerSpecBuilder::new(&filters).build(ClipShape::Square, false);
    let palette = poster_core::Palette::from_hex(&["#000000"]).unwrap();
    let theme = ThemeBuilder::new(&styles)
        .build(&palette, poster_common::HexColor::WHITE, false)
        .unwrap();
    for class in spec.classes() {
        assert!(theme.iter().any(|(c, _)| c == class), "{} has no style", class);
    }
    assert!(spec.get(FeatureClass::Background).is_none());
}

// ============================================================================
// Duplicate tag keys
// ============================================================================

#[test]
fn test_park_filter_union() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    let park = &spec.get(FeatureClass::Park).unwrap().tags;

    assert_eq!(park.get("leisure"), Some(&TagPredicate::any_of(&["park", "nature_reserve"])));
    assert_eq!(
        park.get("landuse"),
        Some(&TagPredicate::any_of(&["golf_course", "meadow", "military"]))
    );
    assert!(park.matches(&tags(&[("leisure", "park")])));
    assert!(park.matches(&tags(&[("landuse", "meadow")])));
    assert!(!park.matches(&tags(&[("landuse", "farmland")])));
}

#[test]
fn test_park_filter_last_write_wins() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table)
        .with_policy(DuplicateKeyPolicy::LastWriteWins)
        .build(ClipShape::Square, false);
    let park = &spec.get(FeatureClass::Park).unwrap().tags;

    assert_eq!(park.get("leisure"), Some(&TagPredicate::value("nature_reserve")));
    assert_eq!(park.get("landuse"), Some(&TagPredicate::value("military")));
    assert!(!park.matches(&tags(&[("leisure", "park")])));
}

#[test]
fn test_wetland_filter_under_both_policies() {
    let table = FilterTable::default();

    let union = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    let wetland = &union.get(FeatureClass::Wetland).unwrap().tags;
    assert_eq!(wetland.len(), 1);
    assert!(wetland.matches(&tags(&[("natural", "wetland")])));
    assert!(wetland.matches(&tags(&[("natural", "scrub")])));

    let last = LayerSpecBuilder::new(&table)
        .with_policy(DuplicateKeyPolicy::LastWriteWins)
        .build(ClipShape::Square, false);
    let wetland = &last.get(FeatureClass::Wetland).unwrap().tags;
    assert!(!wetland.matches(&tags(&[("natural", "wetland")])));
    assert!(wetland.matches(&tags(&[("natural", "scrub")])));
}

#[test]
fn test_custom_filter_union_keeps_missing_key() {
    let table = FilterTable::default().with_class(
        FeatureClass::Beach,
        ClassFilter {
            tags: vec![
                ("access".to_string(), TagPredicate::Present(false)),
                ("access".to_string(), TagPredicate::value("yes")),
            ],
            union: true,
            widths: None,
            overpass: true,
        },
    );
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    let beach = spec.get(FeatureClass::Beach).unwrap();

    assert!(beach.tags.matches(&tags(&[("natural", "beach")])));
    assert!(beach.tags.matches(&tags(&[("access", "yes")])));
    assert!(!beach.tags.matches(&tags(&[("access", "private")])));
    assert_eq!(
        beach.custom_filter.as_deref().unwrap(),
        [r#"[!"access"]"#.to_string(), r#"["access"~"yes"]"#.to_string()]
    );
}

#[test]
fn test_building_matches_any_building_value() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Square, false);
    let building = &spec.get(FeatureClass::Building).unwrap().tags;
    assert!(building.matches(&tags(&[("building", "yes")])));
    assert!(building.matches(&tags(&[("landuse", "construction")])));
    assert!(!building.matches(&tags(&[("amenity", "bench")])));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_layer_spec_json_shape() {
    let table = FilterTable::default();
    let spec = LayerSpecBuilder::new(&table).build(ClipShape::Circle, true);
    let json = serde_json::to_value(&spec).unwrap();

    assert_eq!(json["water"]["circle"], false);
    assert_eq!(json["water"]["dilate"], 100.0);
    assert_eq!(json["building"]["union"], false);
    assert_eq!(json["building"]["tags"]["building"], true);
    assert_eq!(json["wetland"]["tags"]["natural"][1], "scrub");
    assert!(json["streets"]["width"].is_object());
}
