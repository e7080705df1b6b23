//! Print margins around a rendered poster.
//!
//! The margin width in pixels is derived from the image's *current* pixel
//! width and its declared physical width, so a margin given in centimetres
//! ends up the right size on paper. Padding is not idempotent: applying it to
//! an already padded file adds a second border.

use std::io::Write;
use std::path::Path;

use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
use poster_common::{HexColor, PhysicalSize, PosterError, PosterResult};
use tracing::info;

use crate::png::{encode_png, PixelLayout};

/// Largest padded canvas, in pixels, the compositor will allocate.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 30;

/// Margin settings for one poster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginConfig {
    /// Margin on each side, in centimetres.
    pub margin_cm: f64,
    pub fill: HexColor,
    /// Resolution written to the output file.
    pub dpi: u32,
}

impl MarginConfig {
    /// White margin of `margin_mm` millimetres.
    pub fn from_mm(margin_mm: u32, dpi: u32) -> Self {
        Self {
            margin_cm: f64::from(margin_mm) / 10.0,
            fill: HexColor::WHITE,
            dpi,
        }
    }
}

/// Result of padding a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginOutcome {
    pub margin_px: u32,
    pub width: u32,
    pub height: u32,
}

/// Margin width in pixels for an image `pixel_width` wide that prints at `physical_width_cm`.
pub fn margin_pixels(pixel_width: u32, physical_width_cm: f64, margin_cm: f64) -> PosterResult<u32> {
    if !(physical_width_cm.is_finite() && physical_width_cm > 0.0) {
        return Err(PosterError::Validation(format!(
            "physical width must be positive, got {}",
            physical_width_cm
        )));
    }
    if !(margin_cm.is_finite() && margin_cm >= 0.0) {
        return Err(PosterError::Validation(format!(
            "margin must be non-negative, got {}",
            margin_cm
        )));
    }

    let pixels_per_cm = f64::from(pixel_width) / physical_width_cm;
    let margin = (margin_cm * pixels_per_cm).round();
    if margin > f64::from(u32::MAX) {
        return Err(PosterError::Validation(format!(
            "margin of {} cm is {} px, too large",
            margin_cm, margin
        )));
    }
    Ok(margin as u32)
}

/// Size of an image `width` x `height` after adding `margin_px` on every side.
fn padded_size(width: u32, height: u32, margin_px: u32) -> PosterResult<(u32, u32)> {
    let grown = margin_px.checked_mul(2);
    let size = grown.and_then(|m| Some((width.checked_add(m)?, height.checked_add(m)?)));
    match size {
        Some((w, h)) if u64::from(w) * u64::from(h) <= MAX_CANVAS_PIXELS => Ok((w, h)),
        _ => Err(PosterError::Validation(format!(
            "{}x{} image with a {} px margin exceeds the {} pixel canvas limit",
            width, height, margin_px, MAX_CANVAS_PIXELS
        ))),
    }
}

/// Pad `image` with `margin_px` pixels of `fill` on every side.
///
/// The original pixels are copied unchanged; images with an alpha channel stay RGBA.
/// Fails with `Validation` when the padded canvas would exceed [`MAX_CANVAS_PIXELS`].
pub fn pad_image(image: &DynamicImage, margin_px: u32, fill: HexColor) -> PosterResult<DynamicImage> {
    let (width, height) = image.dimensions();
    let (new_width, new_height) = padded_size(width, height, margin_px)?;
    let offset = i64::from(margin_px);

    if image.color().has_alpha() {
        let mut canvas = RgbaImage::from_pixel(new_width, new_height, Rgba(fill.to_rgba()));
        image::imageops::replace(&mut canvas, &image.to_rgba8(), offset, offset);
        Ok(DynamicImage::ImageRgba8(canvas))
    } else {
        let mut canvas = RgbImage::from_pixel(new_width, new_height, Rgb(fill.to_rgb()));
        image::imageops::replace(&mut canvas, &image.to_rgb8(), offset, offset);
        Ok(DynamicImage::ImageRgb8(canvas))
    }
}

/// Add the configured margin to an in-memory image.
pub fn apply_margin_to_image(
    image: &DynamicImage,
    physical_size: PhysicalSize,
    config: &MarginConfig,
) -> PosterResult<DynamicImage> {
    let margin_px = margin_pixels(image.width(), physical_size.width_cm, config.margin_cm)?;
    pad_image(image, margin_px, config.fill)
}

/// Encode an image as PNG with the given resolution.
pub fn encode_with_dpi(image: &DynamicImage, dpi: u32) -> PosterResult<Vec<u8>> {
    let (width, height) = image.dimensions();
    match image {
        DynamicImage::ImageRgba8(buf) => {
            encode_png(buf.as_raw(), width as usize, height as usize, PixelLayout::Rgba, dpi)
        }
        DynamicImage::ImageRgb8(buf) => {
            encode_png(buf.as_raw(), width as usize, height as usize, PixelLayout::Rgb, dpi)
        }
        other if other.color().has_alpha() => {
            let buf = other.to_rgba8();
            encode_png(buf.as_raw(), width as usize, height as usize, PixelLayout::Rgba, dpi)
        }
        other => {
            let buf = other.to_rgb8();
            encode_png(buf.as_raw(), width as usize, height as usize, PixelLayout::Rgb, dpi)
        }
    }
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The target is replaced only once the whole file has been written, and an
/// existing target keeps its permissions.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> PosterResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| PosterError::Io(format!("cannot create temporary file in {}: {}", dir.display(), e)))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    if let Ok(metadata) = std::fs::metadata(path) {
        std::fs::set_permissions(tmp.path(), metadata.permissions())?;
    }
    tmp.persist(path)
        .map_err(|e| PosterError::Io(format!("cannot write {}: {}", path.display(), e.error)))?;
    Ok(())
}

/// Pad the PNG at `path` in place.
///
/// `physical_size` is the print size of the image as it currently is on disk.
pub fn apply_margin(
    path: &Path,
    physical_size: PhysicalSize,
    config: &MarginConfig,
) -> PosterResult<MarginOutcome> {
    let image = image::open(path)
        .map_err(|e| PosterError::Io(format!("cannot read {}: {}", path.display(), e)))?;

    let padded = apply_margin_to_image(&image, physical_size, config)?;
    let margin_px = (padded.width() - image.width()) / 2;
    let bytes = encode_with_dpi(&padded, config.dpi)?;
    write_atomically(path, &bytes)?;

    let outcome = MarginOutcome {
        margin_px,
        width: padded.width(),
        height: padded.height(),
    };
    info!(
        path = %path.display(),
        margin_cm = config.margin_cm,
        margin_px,
        width = outcome.width,
        height = outcome.height,
        dpi = config.dpi,
        "Applied print margin"
    );
    Ok(outcome)
}
