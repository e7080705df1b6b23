//! The contract with the external map renderer.

use std::path::PathBuf;

use poster_common::{ClipShape, PaperFormat, PosterResult};
use serde::Serialize;

use crate::layers::LayerSpec;
use crate::theme::Theme;

/// Everything the renderer needs to draw one poster.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRequest {
    /// Geocodable location text.
    pub query: String,
    /// Search radius in metres.
    pub radius: u32,
    /// `(width, height)` of the figure in inches.
    pub figure_size: (f64, f64),
    /// Width over height of the figure.
    pub ratio: f64,
    pub dpi: u32,
    pub title: Option<String>,
    pub credit: bool,
    pub shape: ClipShape,
    /// Padding around the map, in pixels at `dpi`.
    pub padding: f64,
    pub layers: LayerSpec,
    pub style: Theme,
    /// Where the raster must be written.
    pub output: PathBuf,
}

/// External collaborator turning a request into a raster file at `request.output`.
pub trait Renderer {
    fn render(&self, request: &RenderRequest) -> PosterResult<()>;
}

/// Deterministic output file name for a poster.
///
/// Location text is lowercased, commas become underscores and spaces are
/// dropped. `theme` is replaced by `bw` for black & white posters.
pub fn poster_filename(
    location: &str,
    radius: u32,
    format: PaperFormat,
    shape: ClipShape,
    theme: &str,
    bw: bool,
) -> String {
    let location = location.to_lowercase().replace(',', "_").replace(' ', "");
    let theme = if bw { "bw" } else { theme };
    format!("{}-{}-{}-{}-{}.png", location, radius, format, shape, theme)
}
