//! Synthetic raster generators.
//!
//! Images have predictable pixel values so tests can check exactly where the
//! original content ended up after compositing.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Creates an RGB image where each pixel encodes its position.
///
/// Pixel `(x, y)` is `[x % 256, y % 256, 128]`.
///
/// # Example
///
/// ```
/// use test_utils::create_position_image;
///
/// let img = create_position_image(4, 3);
/// assert_eq!(img.get_pixel(2, 1).0, [2, 1, 128]);
/// ```
pub fn create_position_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 128]))
}

/// Creates an RGBA image with a single color.
pub fn create_solid_rgba_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Writes a position-encoded RGB PNG to `dir/name` and returns its path.
pub fn write_rgb_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    create_position_image(width, height)
        .save(&path)
        .expect("Failed to write RGB fixture");
    path
}

/// Writes a single-color RGBA PNG to `dir/name` and returns its path.
pub fn write_rgba_fixture(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    create_solid_rgba_image(width, height, color)
        .save(&path)
        .expect("Failed to write RGBA fixture");
    path
}
