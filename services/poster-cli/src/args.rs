//! Command-line arguments and their translation into poster parameters.

use std::path::PathBuf;

use clap::Parser;
use poster_common::{ClipShape, HexColor, PaperFormat};
use poster_core::pipeline::REFERENCE_DPI;
use poster_core::{DuplicateKeyPolicy, PosterParams};

#[derive(Parser, Debug)]
#[command(name = "poster")]
#[command(about = "Generate printable map posters")]
pub struct Args {
    /// Location to center the poster on (anything the geocoder understands)
    #[arg(short, long, required_unless_present = "list_themes")]
    pub location: Option<String>,

    /// Radius around the location, in metres
    #[arg(short, long, default_value = "1000")]
    pub radius: u32,

    /// Clip the map to a circle instead of a square
    #[arg(long)]
    pub circle: bool,

    /// Paper format: square, A3, A2, A1, A0, 54 or 169
    #[arg(short, long, default_value = "A3")]
    pub format: PaperFormat,

    /// Theme preset or color scheme name (append _r to reverse a scheme)
    #[arg(short, long, default_value = "default")]
    pub theme: String,

    /// Portrait orientation
    #[arg(long)]
    pub vertical: bool,

    /// Let rivers run past the poster outline
    #[arg(long)]
    pub river_overflow: bool,

    /// Background color for color-scheme themes
    #[arg(long, default_value = "#ffffff")]
    pub background_color: HexColor,

    /// White print margin on each side, in millimetres
    #[arg(long, default_value = "0")]
    pub margins_mm: u32,

    /// Multiply the paper size
    #[arg(long, default_value = "1")]
    pub scaling_factor: u32,

    /// Padding around the map, in pixels at 100 dpi
    #[arg(long, default_value = "100")]
    pub padding: u32,

    /// Use the location text as the poster title
    #[arg(long)]
    pub cmd_as_title: bool,

    /// Poster title (takes precedence over --cmd-as-title)
    #[arg(long = "customtitle")]
    pub custom_title: Option<String>,

    /// Directory for the finished poster
    #[arg(short, long, env = "POSTER_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output resolution
    #[arg(long, default_value_t = REFERENCE_DPI)]
    pub dpi: u32,

    /// Draw the map data credit
    #[arg(long, overrides_with = "no_credit")]
    pub credit: bool,

    /// Omit the map data credit
    #[arg(long, overrides_with = "credit")]
    pub no_credit: bool,

    /// Black & white poster
    #[arg(long)]
    pub bw: bool,

    /// How repeated tag keys in a layer filter combine: union or last-write-wins
    #[arg(long, default_value = "union", value_parser = parse_tag_merge)]
    pub tag_merge: DuplicateKeyPolicy,

    /// Renderer program, run as `<program> <renderer-arg>... <request.json>`
    #[arg(long, env = "POSTER_RENDERER_CMD")]
    pub renderer_cmd: Option<String>,

    /// Argument passed to the renderer before the request path (repeatable)
    #[arg(long = "renderer-arg", allow_hyphen_values = true)]
    pub renderer_args: Vec<String>,

    /// Write the render request JSON to this path and exit without rendering
    #[arg(long)]
    pub emit_spec: Option<PathBuf>,

    /// Extra theme presets (YAML), added to and overriding the built-in ones
    #[arg(long, env = "POSTER_THEMES_FILE")]
    pub themes_file: Option<PathBuf>,

    /// List theme presets and color schemes, then exit
    #[arg(long)]
    pub list_themes: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

fn parse_tag_merge(s: &str) -> Result<DuplicateKeyPolicy, String> {
    match s.to_lowercase().as_str() {
        "union" => Ok(DuplicateKeyPolicy::Union),
        "last-write-wins" | "last" => Ok(DuplicateKeyPolicy::LastWriteWins),
        other => Err(format!(
            "unknown tag merge policy '{}', expected union or last-write-wins",
            other
        )),
    }
}

impl Args {
    /// Poster parameters for this invocation. `None` without a location.
    pub fn to_params(&self) -> Option<PosterParams> {
        let location = self.location.as_ref()?;
        let mut params = PosterParams::new(location.clone());
        params.radius = self.radius;
        params.shape = ClipShape::from_circle_flag(self.circle);
        params.format = self.format;
        params.theme = self.theme.clone();
        params.vertical = self.vertical;
        params.river_overflow = self.river_overflow;
        params.background_color = self.background_color;
        params.margins_mm = self.margins_mm;
        params.scaling_factor = self.scaling_factor;
        params.padding = self.padding;
        params.cmd_as_title = self.cmd_as_title;
        params.custom_title = self.custom_title.clone();
        params.output_dir = self.output_dir.clone();
        params.dpi = self.dpi;
        params.credit = !self.no_credit;
        params.bw = self.bw;
        params.tag_policy = self.tag_merge;
        Some(params)
    }
}
