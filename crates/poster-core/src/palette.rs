//! Building palettes derived from named color schemes.
//!
//! Two kinds of scheme are supported:
//! - **Listed**: an explicit list of RGB triples. Every entry becomes one
//!   palette color, in order.
//! - **Segmented**: per-channel control points `(position, before, after)`.
//!   One palette color is produced per control-point index from the `after`
//!   values. Nothing is interpolated between control points.
//!
//! Schemes are looked up through [`SchemeRegistry`], which returns an explicit
//! not-found error instead of an empty palette.

use std::collections::BTreeMap;

use poster_common::{HexColor, PosterError, PosterResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schemes;

/// Suffix selecting the reversed version of a scheme.
const REVERSED_SUFFIX: &str = "_r";

/// An ordered list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<HexColor>);

impl Palette {
    pub fn new(colors: Vec<HexColor>) -> Self {
        Self(colors)
    }

    /// Parse every entry as a hex color.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> PosterResult<Self> {
        colors
            .iter()
            .map(|c| c.as_ref().parse())
            .collect::<PosterResult<Vec<_>>>()
            .map(Self)
    }

    /// Palette with the single color given.
    pub fn single(color: HexColor) -> Self {
        Self(vec![color])
    }

    pub fn colors(&self) -> &[HexColor] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Colors as `#rrggbb` strings.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.0.iter().map(HexColor::to_string).collect()
    }
}

/// One channel control point: `(position, value_before, value_after)`.
pub type ControlPoint = (f64, f64, f64);

/// Control points for each channel of a segmented scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentData {
    pub red: Vec<ControlPoint>,
    pub green: Vec<ControlPoint>,
    pub blue: Vec<ControlPoint>,
}

impl SegmentData {
    /// Evenly spaced control points from a list of colors, with equal values on
    /// both sides of every point.
    pub fn from_colors(colors: &[[f64; 3]]) -> Self {
        let last = colors.len().saturating_sub(1).max(1) as f64;
        let channel = |c: usize| -> Vec<ControlPoint> {
            colors
                .iter()
                .enumerate()
                .map(|(i, rgb)| (i as f64 / last, rgb[c], rgb[c]))
                .collect()
        };
        Self {
            red: channel(0),
            green: channel(1),
            blue: channel(2),
        }
    }

    /// Mirror every channel: positions flip and before/after swap.
    pub fn reversed(&self) -> Self {
        let mirror = |points: &[ControlPoint]| -> Vec<ControlPoint> {
            points
                .iter()
                .rev()
                .map(|&(x, before, after)| (1.0 - x, after, before))
                .collect()
        };
        Self {
            red: mirror(&self.red),
            green: mirror(&self.green),
            blue: mirror(&self.blue),
        }
    }
}

/// A named color scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorScheme {
    /// Explicit RGB triples with channels in `[0, 1]`.
    Listed(Vec<[f64; 3]>),
    /// Per-channel control points.
    Segmented(SegmentData),
}

impl ColorScheme {
    pub fn reversed(&self) -> Self {
        match self {
            ColorScheme::Listed(colors) => {
                ColorScheme::Listed(colors.iter().rev().copied().collect())
            }
            ColorScheme::Segmented(data) => ColorScheme::Segmented(data.reversed()),
        }
    }

    /// Derive the palette of this scheme.
    ///
    /// `name` is only used for error messages.
    pub fn to_palette(&self, name: &str) -> PosterResult<Palette> {
        match self {
            ColorScheme::Listed(colors) => Ok(Palette(
                colors
                    .iter()
                    .map(|&[r, g, b]| HexColor::from_unit_rgb(r, g, b))
                    .collect(),
            )),
            ColorScheme::Segmented(data) => {
                let n = data.blue.len();
                if data.red.len() != n || data.green.len() != n {
                    return Err(PosterError::SchemeData {
                        scheme: name.to_string(),
                        message: format!(
                            "channel control points have unequal lengths (red={}, green={}, blue={})",
                            data.red.len(),
                            data.green.len(),
                            n
                        ),
                    });
                }
                let colors = (0..n)
                    .map(|i| HexColor::from_unit_rgb(data.red[i].2, data.green[i].2, data.blue[i].2))
                    .collect();
                Ok(Palette(colors))
            }
        }
    }
}

/// Registry of named color schemes.
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    schemes: BTreeMap<String, ColorScheme>,
}

impl SchemeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in scheme catalogue.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, scheme) in schemes::builtin_schemes() {
            registry.register(name, scheme);
        }
        registry
    }

    /// Add or replace a scheme.
    pub fn register(&mut self, name: impl Into<String>, scheme: ColorScheme) {
        self.schemes.insert(name.into(), scheme);
    }

    /// Look up a scheme, resolving the `_r` suffix to a reversed base scheme.
    pub fn get(&self, name: &str) -> Option<ColorScheme> {
        if let Some(scheme) = self.schemes.get(name) {
            return Some(scheme.clone());
        }
        name.strip_suffix(REVERSED_SUFFIX)
            .and_then(|base| self.schemes.get(base))
            .map(ColorScheme::reversed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Base scheme names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemes.keys().map(String::as_str)
    }

    /// Derive the palette for the named scheme.
    pub fn derive_palette(&self, name: &str) -> PosterResult<Palette> {
        let scheme = self
            .get(name)
            .ok_or_else(|| PosterError::SchemeNotFound(name.to_string()))?;
        let palette = scheme.to_palette(name)?;
        debug!(scheme = name, colors = ?palette.to_hex_strings(), "Derived palette");
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_preserves_order() {
        let scheme = ColorScheme::Listed(vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let palette = scheme.to_palette("test").unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#ff0000", "#0000ff"]);
    }

    #[test]
    fn test_segmented_reads_after_values() {
        let scheme = ColorScheme::Segmented(SegmentData {
            red: vec![(0.0, 0.0, 1.0), (1.0, 0.0, 0.0)],
            green: vec![(0.0, 1.0, 0.0), (1.0, 1.0, 1.0)],
            blue: vec![(0.0, 0.0, 0.0), (1.0, 0.0, 1.0)],
        });
        let palette = scheme.to_palette("test").unwrap();
        assert_eq!(palette.to_hex_strings(), vec!["#ff0000", "#00ffff"]);
    }

    #[test]
    fn test_segmented_unequal_lengths() {
        let scheme = ColorScheme::Segmented(SegmentData {
            red: vec![(0.0, 0.0, 0.0), (0.5, 0.5, 0.5), (1.0, 1.0, 1.0)],
            green: vec![(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            blue: vec![(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
        });
        let err = scheme.to_palette("uneven").unwrap_err();
        assert!(matches!(err, PosterError::SchemeData { ref scheme, .. } if scheme == "uneven"));
    }

    #[test]
    fn test_reversed_segment_swaps_sides() {
        let data = SegmentData {
            red: vec![(0.0, 0.2, 0.4), (1.0, 0.6, 0.8)],
            green: vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
            blue: vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
        };
        let reversed = data.reversed();
        assert_eq!(reversed.red, vec![(0.0, 0.8, 0.6), (1.0, 0.4, 0.2)]);
    }

    #[test]
    fn test_from_colors_spacing() {
        let data = SegmentData::from_colors(&[[0.0; 3], [0.5; 3], [1.0; 3]]);
        let positions: Vec<f64> = data.red.iter().map(|p| p.0).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_registry_unknown_scheme() {
        let registry = SchemeRegistry::new();
        let err = registry.derive_palette("nope").unwrap_err();
        assert!(matches!(err, PosterError::SchemeNotFound(ref name) if name == "nope"));
    }
}
