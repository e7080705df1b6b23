//! Named theme presets loaded from YAML.
//!
//! A preset fixes the building palette and the background color. The built-in
//! catalogue ships with the crate; a user file can add presets or override
//! built-in ones by name.

use std::collections::BTreeMap;
use std::path::Path;

use poster_common::{HexColor, PosterError, PosterResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::palette::{Palette, SchemeRegistry};

const BUILTIN_THEMES: &str = include_str!("../config/themes.yaml");

/// A named palette and background pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePreset {
    pub building_palette: Palette,
    pub background_color: HexColor,
}

/// Collection of theme presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresetCatalog {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub themes: BTreeMap<String, ThemePreset>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl PresetCatalog {
    /// The presets shipped with the crate.
    pub fn builtin() -> PosterResult<Self> {
        Self::from_yaml(BUILTIN_THEMES)
    }

    /// Parse and validate a catalogue.
    pub fn from_yaml(yaml: &str) -> PosterResult<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)
            .map_err(|e| PosterError::Config(format!("invalid theme presets: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load a catalogue from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| PosterError::Io(format!("cannot read {}: {}", path.display(), e)))?;
        let catalog = Self::from_yaml(&content)?;
        info!(path = %path.display(), themes = catalog.themes.len(), "Loaded theme presets");
        Ok(catalog)
    }

    /// Every preset needs at least one building color.
    pub fn validate(&self) -> PosterResult<()> {
        for (name, preset) in &self.themes {
            if preset.building_palette.is_empty() {
                return Err(PosterError::Validation(format!(
                    "theme '{}' has an empty building palette",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Add `other`'s presets, replacing presets with the same name.
    pub fn merge(mut self, other: PresetCatalog) -> Self {
        self.themes.extend(other.themes);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ThemePreset> {
        self.themes.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

/// Palette and background resolved from a theme name.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    pub palette: Palette,
    pub background: HexColor,
}

/// Resolve a theme name to a palette and background.
///
/// A preset name wins over a scheme name. A scheme is combined with
/// `background`; a preset brings its own.
pub fn resolve_theme(
    name: &str,
    background: HexColor,
    presets: &PresetCatalog,
    schemes: &SchemeRegistry,
) -> PosterResult<ResolvedTheme> {
    if let Some(preset) = presets.get(name) {
        debug!(theme = name, "Using theme preset");
        return Ok(ResolvedTheme {
            palette: preset.building_palette.clone(),
            background: preset.background_color,
        });
    }

    if !schemes.contains(name) {
        return Err(PosterError::ThemeNotFound(name.to_string()));
    }

    Ok(ResolvedTheme {
        palette: schemes.derive_palette(name)?,
        background,
    })
}
