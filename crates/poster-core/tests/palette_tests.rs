//! Tests for palette derivation from named color schemes.

use poster_common::{ErrorKind, PosterError};
use poster_core::{ColorScheme, SchemeRegistry, SegmentData};

// ============================================================================
// Discrete schemes
// ============================================================================

#[test]
fn test_set1_colors_in_order() {
    let registry = SchemeRegistry::builtin();
    let palette = registry.derive_palette("Set1").unwrap();
    assert_eq!(
        palette.to_hex_strings(),
        vec![
            "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628",
            "#f781bf", "#999999"
        ]
    );
}

#[test]
fn test_set3_has_twelve_colors() {
    let registry = SchemeRegistry::builtin();
    let palette = registry.derive_palette("Set3").unwrap();
    assert_eq!(palette.len(), 12);
    assert_eq!(palette.colors()[0].to_string(), "#8dd3c7");
    assert_eq!(palette.colors()[11].to_string(), "#ffed6f");
}

#[test]
fn test_every_builtin_listed_scheme_derives() {
    let registry = SchemeRegistry::builtin();
    for name in ["Set1", "Set2", "Set3", "Pastel1", "Pastel2", "Paired", "Accent", "Dark2", "tab10"] {
        let palette = registry.derive_palette(name).unwrap();
        assert!(!palette.is_empty(), "{} derived an empty palette", name);
    }
}

// ============================================================================
// Continuous schemes
// ============================================================================

#[test]
fn test_segmented_uses_value_after_each_point() {
    let mut registry = SchemeRegistry::new();
    registry.register(
        "step",
        ColorScheme::Segmented(SegmentData {
            red: vec![(0.0, 0.0, 0.0), (0.5, 0.0, 1.0), (1.0, 1.0, 1.0)],
            green: vec![(0.0, 0.0, 0.0), (0.5, 0.0, 0.0), (1.0, 0.0, 0.0)],
            blue: vec![(0.0, 1.0, 1.0), (0.5, 1.0, 0.0), (1.0, 0.0, 0.0)],
        }),
    );
    let palette = registry.derive_palette("step").unwrap();
    assert_eq!(palette.to_hex_strings(), vec!["#0000ff", "#ff0000", "#ff0000"]);
}

#[test]
fn test_binary_scheme_is_white_to_black() {
    let registry = SchemeRegistry::builtin();
    let palette = registry.derive_palette("binary").unwrap();
    assert_eq!(palette.to_hex_strings(), vec!["#ffffff", "#000000"]);
}

#[test]
fn test_unequal_channel_lengths_is_data_error() {
    let registry = SchemeRegistry::builtin();
    for name in ["bone", "copper", "hot"] {
        let err = registry.derive_palette(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data, "{} should fail with a data error", name);
        assert!(matches!(err, PosterError::SchemeData { .. }));
    }
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_unknown_scheme_is_not_found() {
    let registry = SchemeRegistry::builtin();
    let err = registry.derive_palette("NoSuchScheme").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("NoSuchScheme"));
}

#[test]
fn test_reversed_listed_scheme() {
    let registry = SchemeRegistry::builtin();
    let forward = registry.derive_palette("Dark2").unwrap();
    let reversed = registry.derive_palette("Dark2_r").unwrap();
    let mut expected = forward.to_hex_strings();
    expected.reverse();
    assert_eq!(reversed.to_hex_strings(), expected);
}

#[test]
fn test_reversed_ramp() {
    let registry = SchemeRegistry::builtin();
    let reversed = registry.derive_palette("Greys_r").unwrap();
    assert_eq!(reversed.colors().first().unwrap().to_string(), "#000000");
    assert_eq!(reversed.colors().last().unwrap().to_string(), "#ffffff");
}

#[test]
fn test_reversed_unknown_is_not_found() {
    let registry = SchemeRegistry::builtin();
    let err = registry.derive_palette("Nope_r").unwrap_err();
    assert!(matches!(err, PosterError::SchemeNotFound(name) if name == "Nope_r"));
}
