//! Per-feature visual styles.
//!
//! A [`Theme`] holds one [`StyleRule`] for every [`FeatureClass`]. Themes are
//! built from a fixed [`StyleTable`], a building palette and a background
//! color. In black & white mode the same table is used with every fill turned
//! white, every edge turned black and the outline widths substituted for the
//! regular line widths.

use std::collections::BTreeMap;

use poster_common::{FeatureClass, HexColor, PosterError, PosterResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::palette::Palette;

/// Hatch pattern used by the textured classes.
const DOTS: &str = "......";

/// How a class is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Fill {
    /// Outline only.
    None,
    /// A single color.
    Solid(HexColor),
    /// One palette color picked per feature by the renderer.
    Palette(Palette),
}

/// Complete style for one feature class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
    pub fill: Fill,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hatch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hatch_color: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    pub z_index: i32,
}

impl StyleRule {
    /// The solid fill color, if this rule has one.
    pub fn fill_color(&self) -> Option<HexColor> {
        match &self.fill {
            Fill::Solid(color) => Some(*color),
            _ => None,
        }
    }

    /// The fill palette, if this rule has one.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.fill {
            Fill::Palette(palette) => Some(palette),
            _ => None,
        }
    }
}

/// Where a class takes its fill from.
#[derive(Debug, Clone, PartialEq)]
pub enum FillSource {
    /// The theme's background color.
    Background,
    /// A constant color.
    Solid(HexColor),
    /// The building palette.
    Palette,
    /// No fill.
    Hollow,
}

/// Fixed style constants for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStyle {
    pub fill: FillSource,
    pub edge_color: Option<HexColor>,
    /// Line width in color mode.
    pub line_width: Option<f64>,
    /// Line width in black & white mode.
    pub outline_width: Option<f64>,
    pub hatch: Option<String>,
    pub hatch_color: Option<HexColor>,
    /// Whether the hatch survives black & white mode.
    pub hatch_in_bw: bool,
    pub alpha: Option<f64>,
    pub z_index: i32,
}

impl ClassStyle {
    fn new(fill: FillSource, z_index: i32) -> Self {
        Self {
            fill,
            edge_color: None,
            line_width: None,
            outline_width: None,
            hatch: None,
            hatch_color: None,
            hatch_in_bw: false,
            alpha: None,
            z_index,
        }
    }

    fn edge(mut self, color: HexColor) -> Self {
        self.edge_color = Some(color);
        self
    }

    /// Same width in both modes.
    fn width(self, width: f64) -> Self {
        self.widths(width, width)
    }

    fn widths(mut self, color_mode: f64, bw_mode: f64) -> Self {
        self.line_width = Some(color_mode);
        self.outline_width = Some(bw_mode);
        self
    }

    fn hatched(mut self, color: Option<HexColor>, keep_in_bw: bool) -> Self {
        self.hatch = Some(DOTS.to_string());
        self.hatch_color = color;
        self.hatch_in_bw = keep_in_bw;
        self
    }

    fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    fn to_rule(&self, palette: &Palette, background: HexColor, bw: bool) -> StyleRule {
        let fill = match (&self.fill, bw) {
            (FillSource::Hollow, _) => Fill::None,
            (FillSource::Palette, true) => Fill::Palette(Palette::single(HexColor::WHITE)),
            (FillSource::Palette, false) => Fill::Palette(palette.clone()),
            (_, true) => Fill::Solid(HexColor::WHITE),
            (FillSource::Background, false) => Fill::Solid(background),
            (FillSource::Solid(color), false) => Fill::Solid(*color),
        };

        if !bw {
            return StyleRule {
                fill,
                edge_color: self.edge_color,
                line_width: self.line_width,
                hatch: self.hatch.clone(),
                hatch_color: self.hatch_color,
                alpha: self.alpha,
                z_index: self.z_index,
            };
        }

        StyleRule {
            fill,
            edge_color: Some(HexColor::BLACK),
            line_width: self.outline_width,
            hatch: self.hatch.clone().filter(|_| self.hatch_in_bw),
            hatch_color: None,
            alpha: self.alpha,
            z_index: self.z_index,
        }
    }
}

/// Fixed style constants for every feature class.
///
/// The table always covers the whole closed set of classes; entries can be
/// replaced but not removed.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleTable {
    classes: BTreeMap<FeatureClass, ClassStyle>,
}

impl StyleTable {
    pub fn get(&self, class: FeatureClass) -> &ClassStyle {
        &self.classes[&class]
    }

    /// Replace the constants for one class.
    pub fn with_class(mut self, class: FeatureClass, style: ClassStyle) -> Self {
        self.classes.insert(class, style);
        self
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        let dark = HexColor::new(0x2f, 0x37, 0x37);
        let olive = HexColor::new(0xae, 0xb4, 0x41);
        let street_edge = HexColor::new(0x47, 0x56, 0x57);
        let green_fill = HexColor::new(0x8b, 0xb1, 0x74);
        let green_hatch = HexColor::new(0xa7, 0xc4, 0x97);

        let classes = BTreeMap::from([
            (
                FeatureClass::Background,
                ClassStyle::new(FillSource::Background, -1)
                    .edge(HexColor::new(0xda, 0xdb, 0xc1))
                    .hatched(None, false),
            ),
            (
                FeatureClass::Perimeter,
                ClassStyle::new(FillSource::Hollow, 0).widths(0.0, 0.1),
            ),
            (
                FeatureClass::Green,
                ClassStyle::new(FillSource::Solid(green_fill), 1)
                    .edge(dark)
                    .widths(1.0, 0.2)
                    .hatched(Some(green_hatch), false)
                    .alpha(0.5),
            ),
            (
                FeatureClass::Garden,
                ClassStyle::new(FillSource::Solid(HexColor::new(0x72, 0xc0, 0x7a)), 1)
                    .edge(HexColor::new(0x64, 0xa3, 0x8d))
                    .width(0.0)
                    .hatched(None, true),
            ),
            (
                FeatureClass::Water,
                ClassStyle::new(FillSource::Solid(HexColor::new(0xa8, 0xe1, 0xe6)), 3)
                    .edge(dark)
                    .width(1.0),
            ),
            (
                FeatureClass::Streets,
                ClassStyle::new(FillSource::Solid(dark), 4)
                    .edge(street_edge)
                    .width(0.0)
                    .alpha(1.0),
            ),
            (
                FeatureClass::Pedestrian,
                ClassStyle::new(FillSource::Solid(dark), 4)
                    .edge(street_edge)
                    .width(0.0)
                    .alpha(1.0),
            ),
            (
                FeatureClass::Building,
                ClassStyle::new(FillSource::Palette, 5).edge(dark).width(0.5),
            ),
            (
                FeatureClass::Parking,
                ClassStyle::new(FillSource::Palette, 5)
                    .edge(dark)
                    .widths(0.5, 0.6),
            ),
            (
                FeatureClass::Forest,
                ClassStyle::new(FillSource::Solid(green_fill), 1)
                    .edge(dark)
                    .width(1.0)
                    .hatched(Some(green_hatch), false)
                    .alpha(0.5),
            ),
            (
                FeatureClass::Park,
                ClassStyle::new(FillSource::Solid(HexColor::new(0xaa, 0xd8, 0x97)), 1)
                    .edge(HexColor::new(0x8b, 0xc4, 0x9e))
                    .width(0.0)
                    .hatched(None, true),
            ),
            (
                FeatureClass::Wetland,
                ClassStyle::new(FillSource::Solid(HexColor::new(0xd2, 0xd6, 0x8d)), 3)
                    .edge(olive)
                    .width(0.0)
                    .hatched(None, true),
            ),
            (
                FeatureClass::Beach,
                ClassStyle::new(FillSource::Solid(HexColor::new(0xe3, 0xda, 0x8d)), 3)
                    .edge(olive)
                    .width(0.0),
            ),
        ]);

        Self { classes }
    }
}

/// One style rule per feature class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Theme {
    rules: BTreeMap<FeatureClass, StyleRule>,
}

impl Theme {
    /// The rule for `class`. Every class is present by construction.
    pub fn get(&self, class: FeatureClass) -> &StyleRule {
        &self.rules[&class]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureClass, &StyleRule)> {
        self.rules.iter().map(|(class, rule)| (*class, rule))
    }

    pub fn z_index(&self, class: FeatureClass) -> i32 {
        self.get(class).z_index
    }

    /// Classes in paint order, lowest z-index first.
    ///
    /// Classes sharing a z-index keep declaration order.
    pub fn draw_order(&self) -> Vec<FeatureClass> {
        let mut classes: Vec<FeatureClass> = self.rules.keys().copied().collect();
        classes.sort_by_key(|class| self.z_index(*class));
        classes
    }
}

/// Builds themes from a fixed style table.
#[derive(Debug, Clone, Copy)]
pub struct ThemeBuilder<'a> {
    table: &'a StyleTable,
}

impl<'a> ThemeBuilder<'a> {
    pub fn new(table: &'a StyleTable) -> Self {
        Self { table }
    }

    /// Build a theme.
    ///
    /// `palette` fills buildings and parkings and must not be empty.
    pub fn build(&self, palette: &Palette, background: HexColor, bw: bool) -> PosterResult<Theme> {
        if palette.is_empty() {
            return Err(PosterError::Validation(
                "building palette must contain at least one color".to_string(),
            ));
        }

        let rules = FeatureClass::ALL
            .iter()
            .map(|&class| (class, self.table.get(class).to_rule(palette, background, bw)))
            .collect();

        debug!(
            palette_len = palette.len(),
            background = %background,
            bw,
            "Built theme"
        );
        Ok(Theme { rules })
    }
}
