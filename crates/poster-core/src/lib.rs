//! Poster configuration and print finishing.
//!
//! Builds what the external map renderer consumes and post-processes what it
//! produces:
//! - Palettes derived from named color schemes
//! - Themes (per-feature styles) and layer specs (per-feature tag filters)
//! - Print margins with resolution metadata

pub mod layers;
pub mod margin;
pub mod palette;
pub mod pipeline;
pub mod png;
pub mod presets;
pub mod request;
pub mod schemes;
pub mod theme;

pub use layers::{DuplicateKeyPolicy, FilterTable, LayerRule, LayerSpec, LayerSpecBuilder, TagFilter, TagPredicate};
pub use margin::{apply_margin, MarginConfig, MarginOutcome};
pub use palette::{ColorScheme, Palette, SchemeRegistry, SegmentData};
pub use pipeline::{generate_poster, prepare_request, PosterParams, PosterTables};
pub use presets::{PresetCatalog, ThemePreset};
pub use request::{poster_filename, RenderRequest, Renderer};
pub use theme::{Fill, StyleRule, StyleTable, Theme, ThemeBuilder};
