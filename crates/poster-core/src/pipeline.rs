//! End-to-end poster generation.
//!
//! Parameters → palette → theme and layer spec → renderer → print margin.
//! Everything before the renderer call is pure; the renderer and the margin
//! step are the only blocking operations.

use std::path::PathBuf;

use poster_common::{ClipShape, HexColor, PaperFormat, PosterError, PosterResult};
use tracing::info;

use crate::layers::{DuplicateKeyPolicy, FilterTable, LayerSpecBuilder};
use crate::margin::{apply_margin, MarginConfig};
use crate::palette::SchemeRegistry;
use crate::presets::{resolve_theme, PresetCatalog};
use crate::request::{poster_filename, RenderRequest, Renderer};
use crate::theme::{StyleTable, ThemeBuilder};

/// Resolution padding values are expressed at.
pub const REFERENCE_DPI: u32 = 100;

/// User-facing poster parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterParams {
    pub location: String,
    /// Radius in metres around the location.
    pub radius: u32,
    pub shape: ClipShape,
    pub format: PaperFormat,
    /// Preset or color scheme name.
    pub theme: String,
    pub vertical: bool,
    pub river_overflow: bool,
    pub background_color: HexColor,
    pub margins_mm: u32,
    pub scaling_factor: u32,
    /// Padding in pixels at [`REFERENCE_DPI`].
    pub padding: u32,
    pub cmd_as_title: bool,
    pub custom_title: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub dpi: u32,
    pub credit: bool,
    pub bw: bool,
    pub tag_policy: DuplicateKeyPolicy,
}

impl PosterParams {
    /// Parameters with the command-line defaults for `location`.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            radius: 1000,
            shape: ClipShape::Square,
            format: PaperFormat::A3,
            theme: "default".to_string(),
            vertical: false,
            river_overflow: false,
            background_color: HexColor::WHITE,
            margins_mm: 0,
            scaling_factor: 1,
            padding: 100,
            cmd_as_title: false,
            custom_title: None,
            output_dir: None,
            dpi: REFERENCE_DPI,
            credit: true,
            bw: false,
            tag_policy: DuplicateKeyPolicy::default(),
        }
    }

    /// Custom title, else the location when `cmd_as_title`.
    pub fn title(&self) -> Option<String> {
        self.custom_title
            .clone()
            .or_else(|| self.cmd_as_title.then(|| self.location.clone()))
    }

    pub fn filename(&self) -> String {
        poster_filename(
            &self.location,
            self.radius,
            self.format,
            self.shape,
            &self.theme,
            self.bw,
        )
    }

    pub fn output_path(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(self.filename()),
            None => PathBuf::from(self.filename()),
        }
    }

    fn validate(&self) -> PosterResult<()> {
        if self.location.trim().is_empty() {
            return Err(PosterError::Validation("location must not be empty".to_string()));
        }
        if self.dpi == 0 {
            return Err(PosterError::Validation("dpi must be positive".to_string()));
        }
        if self.scaling_factor == 0 {
            return Err(PosterError::Validation(
                "scaling factor must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fixed tables and catalogues, built once and shared by every request.
#[derive(Debug, Clone)]
pub struct PosterTables {
    pub styles: StyleTable,
    pub filters: FilterTable,
    pub presets: PresetCatalog,
    pub schemes: SchemeRegistry,
}

impl PosterTables {
    /// Built-in tables and catalogues.
    pub fn builtin() -> PosterResult<Self> {
        Ok(Self {
            styles: StyleTable::default(),
            filters: FilterTable::default(),
            presets: PresetCatalog::builtin()?,
            schemes: SchemeRegistry::builtin(),
        })
    }
}

/// Build the render request for `params` without rendering anything.
pub fn prepare_request(params: &PosterParams, tables: &PosterTables) -> PosterResult<RenderRequest> {
    params.validate()?;

    let resolved = resolve_theme(
        &params.theme,
        params.background_color,
        &tables.presets,
        &tables.schemes,
    )?;
    let style = ThemeBuilder::new(&tables.styles).build(
        &resolved.palette,
        resolved.background,
        params.bw,
    )?;
    let layers = LayerSpecBuilder::new(&tables.filters)
        .with_policy(params.tag_policy)
        .build(params.shape, params.river_overflow);

    let figure = params
        .format
        .figure_size(f64::from(params.scaling_factor), params.vertical);

    Ok(RenderRequest {
        query: params.location.clone(),
        radius: params.radius,
        figure_size: figure.to_inches(),
        ratio: figure.aspect_ratio(),
        dpi: params.dpi,
        title: params.title(),
        credit: params.credit,
        shape: params.shape,
        padding: f64::from(params.padding) * f64::from(params.dpi) / f64::from(REFERENCE_DPI),
        layers,
        style,
        output: params.output_path(),
    })
}

/// Render a poster and apply the print margin. Returns the output path.
pub fn generate_poster(
    params: &PosterParams,
    tables: &PosterTables,
    renderer: &dyn Renderer,
) -> PosterResult<PathBuf> {
    let request = prepare_request(params, tables)?;

    info!(
        location = %request.query,
        radius = request.radius,
        format = %params.format,
        shape = %request.shape,
        output = %request.output.display(),
        "Rendering poster"
    );
    renderer.render(&request)?;

    if params.margins_mm > 0 {
        let figure = params
            .format
            .figure_size(f64::from(params.scaling_factor), params.vertical);
        let margin = MarginConfig::from_mm(params.margins_mm, params.dpi);
        apply_margin(&request.output, figure, &margin)?;
    }

    info!(output = %request.output.display(), "Poster ready");
    Ok(request.output)
}
