//! Tests for print margin compositing on PNG files.

use image::GenericImageView;
use poster_common::{ErrorKind, HexColor, PhysicalSize};
use poster_core::margin::{apply_margin, margin_pixels, write_atomically, MarginConfig};
use poster_core::png::read_dpi;
use test_utils::{temp_test_dir, temp_test_dir_with_prefix, write_rgb_fixture, write_rgba_fixture};

// ============================================================================
// Helper functions
// ============================================================================

/// 400 px printing 20 cm wide: 20 px per cm.
fn poster_size() -> PhysicalSize {
    PhysicalSize::new(20.0, 10.0)
}

fn config(margin_cm: f64) -> MarginConfig {
    MarginConfig {
        margin_cm,
        fill: HexColor::WHITE,
        dpi: 300,
    }
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_margin_grows_both_dimensions() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 400, 200);

    let outcome = apply_margin(&path, poster_size(), &config(1.0)).unwrap();
    assert_eq!(outcome.margin_px, 20);
    assert_eq!((outcome.width, outcome.height), (440, 240));

    let img = image::open(&path).unwrap();
    assert_eq!(img.dimensions(), (440, 240));
}

#[test]
fn test_original_pixels_are_preserved() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 400, 200);
    apply_margin(&path, poster_size(), &config(1.0)).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(439, 239).0, [255, 255, 255]);
    assert_eq!(img.get_pixel(20, 20).0, [0, 0, 128]);
    assert_eq!(img.get_pixel(20 + 37, 20 + 5).0, [37, 5, 128]);
}

#[test]
fn test_margin_rounds_to_nearest_pixel() {
    // 100 px over 30 cm, 1.5 cm -> 5.0 px; 1.6 cm -> 5.33 px
    assert_eq!(margin_pixels(100, 30.0, 1.5).unwrap(), 5);
    assert_eq!(margin_pixels(100, 30.0, 1.6).unwrap(), 5);
    assert_eq!(margin_pixels(100, 30.0, 1.7).unwrap(), 6);
}

#[test]
fn test_applying_twice_adds_two_borders() {
    let dir = temp_test_dir_with_prefix("margin_twice");
    let path = write_rgb_fixture(dir.path(), "poster.png", 400, 200);
    let size = poster_size();

    let first = apply_margin(&path, size, &config(1.0)).unwrap();
    let grown = size.with_margin(1.0);
    let second = apply_margin(&path, grown, &config(1.0)).unwrap();

    assert_eq!(first.width, 440);
    assert_eq!(second.margin_px, 20);
    assert_eq!(second.width, 480);
    assert_eq!(second.height, 280);
}

#[test]
fn test_zero_margin_keeps_size() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 50, 30);
    let outcome = apply_margin(&path, PhysicalSize::new(5.0, 3.0), &config(0.0)).unwrap();
    assert_eq!((outcome.width, outcome.height), (50, 30));
}

// ============================================================================
// Metadata and color modes
// ============================================================================

#[test]
fn test_dpi_written_to_output() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 400, 200);
    apply_margin(&path, poster_size(), &config(0.5)).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(read_dpi(&bytes), Some(300));
}

#[test]
fn test_rgba_input_stays_rgba() {
    let dir = temp_test_dir();
    let path = write_rgba_fixture(dir.path(), "poster.png", 40, 40, [10, 20, 30, 0]);
    apply_margin(&path, PhysicalSize::new(4.0, 4.0), &config(1.0)).unwrap();

    let img = image::open(&path).unwrap();
    assert!(img.color().has_alpha());
    let buf = img.to_rgba8();
    assert_eq!(buf.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(buf.get_pixel(25, 25).0, [10, 20, 30, 0]);
}

#[test]
fn test_opaque_rgba_input_stays_rgba() {
    let dir = temp_test_dir();
    let path = write_rgba_fixture(dir.path(), "poster.png", 40, 40, [10, 20, 30, 255]);
    apply_margin(&path, PhysicalSize::new(4.0, 4.0), &config(1.0)).unwrap();

    let img = image::open(&path).unwrap();
    assert!(img.color().has_alpha());
    assert_eq!(img.dimensions(), (60, 60));
    let buf = img.to_rgba8();
    assert_eq!(buf.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert_eq!(buf.get_pixel(30, 30).0, [10, 20, 30, 255]);
}

#[cfg(unix)]
#[test]
fn test_permissions_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 40, 20);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    apply_margin(&path, PhysicalSize::new(4.0, 2.0), &config(1.0)).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}

#[test]
fn test_custom_fill_color() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 100, 100);
    let mut cfg = config(1.0);
    cfg.fill = HexColor::new(0x11, 0x22, 0x33);
    apply_margin(&path, PhysicalSize::new(10.0, 10.0), &cfg).unwrap();

    let img = image::open(&path).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(3, 50).0, [0x11, 0x22, 0x33]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_file_is_io_error() {
    let dir = temp_test_dir();
    let path = dir.path().join("missing.png");
    let err = apply_margin(&path, poster_size(), &config(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_non_image_is_io_error() {
    let dir = temp_test_dir();
    let path = dir.path().join("poster.png");
    std::fs::write(&path, b"not a png").unwrap();
    let err = apply_margin(&path, poster_size(), &config(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(std::fs::read(&path).unwrap(), b"not a png");
}

#[test]
fn test_oversized_margin_rejected() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 40, 20);
    let before = std::fs::read(&path).unwrap();

    let err = apply_margin(&path, PhysicalSize::new(4.0, 2.0), &MarginConfig::from_mm(u32::MAX, 100))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_missing_destination_dir_is_io_error() {
    let dir = temp_test_dir();
    let target = dir.path().join("no-such-dir").join("poster.png");
    let err = write_atomically(&target, b"png bytes").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(!target.exists());
}

#[test]
fn test_unwritable_destination_keeps_original() {
    let dir = temp_test_dir();
    let original = write_rgb_fixture(dir.path(), "poster.png", 10, 10);
    let before = std::fs::read(&original).unwrap();

    // A directory cannot be replaced by a file
    let target = dir.path().join("poster-dir");
    std::fs::create_dir(&target).unwrap();
    let err = write_atomically(&target, b"png bytes").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(target.is_dir());

    // No temporary files are left behind and the poster is untouched
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["poster-dir", "poster.png"]);
    assert_eq!(std::fs::read(&original).unwrap(), before);
}

#[test]
fn test_invalid_physical_size_rejected() {
    let dir = temp_test_dir();
    let path = write_rgb_fixture(dir.path(), "poster.png", 10, 10);
    let err = apply_margin(&path, PhysicalSize::new(0.0, 0.0), &config(1.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}
