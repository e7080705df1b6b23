//! PNG encoding with print resolution metadata.
//!
//! Every file carries a `pHYs` chunk so the physical print size can be
//! recovered from the pixel size. Two encodings are produced:
//! - **Indexed PNG (color type 3)** when the image has ≤256 unique colors,
//!   which is typical for flat-filled posters.
//! - **Truecolor PNG (color type 2 or 6)** otherwise.

use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

use poster_common::{PosterError, PosterResult};

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 4096;

const METRES_PER_INCH: f64 = 0.0254;

/// Channel layout of raw pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    fn color_type(self) -> u8 {
        match self {
            PixelLayout::Rgb => 2,
            PixelLayout::Rgba => 6,
        }
    }
}

/// Convert dots per inch to the pixels-per-metre unit used by `pHYs`.
pub fn dpi_to_pixels_per_metre(dpi: u32) -> u32 {
    (f64::from(dpi) / METRES_PER_INCH).round() as u32
}

/// Convert `pHYs` pixels per metre back to dots per inch.
pub fn pixels_per_metre_to_dpi(ppm: u32) -> u32 {
    (f64::from(ppm) * METRES_PER_INCH).round() as u32
}

/// Encode pixels as PNG, choosing indexed encoding when the colors fit.
pub fn encode_png(
    pixels: &[u8],
    width: usize,
    height: usize,
    layout: PixelLayout,
    dpi: u32,
) -> PosterResult<Vec<u8>> {
    let expected = width * height * layout.channels();
    if pixels.len() != expected {
        return Err(PosterError::Validation(format!(
            "pixel buffer has {} bytes, expected {} for {}x{}",
            pixels.len(),
            expected,
            width,
            height
        )));
    }

    let palette = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels, layout)
    } else {
        extract_palette_sequential(pixels, layout)
    };

    match palette {
        Some((palette, indices)) => encode_indexed(width, height, &palette, &indices, layout, dpi),
        None => encode_truecolor(pixels, width, height, layout, dpi),
    }
}

/// Pack a pixel into a u32 for hashing. Missing alpha counts as opaque.
#[inline(always)]
fn pack_pixel(px: &[u8]) -> u32 {
    let a = px.get(3).copied().unwrap_or(255);
    u32::from(px[0]) | (u32::from(px[1]) << 8) | (u32::from(px[2]) << 16) | (u32::from(a) << 24)
}

#[inline(always)]
fn unpack_pixel(packed: u32) -> [u8; 4] {
    packed.to_le_bytes()
}

type IndexedPixels = (Vec<[u8; 4]>, Vec<u8>);

fn extract_palette_sequential(pixels: &[u8], layout: PixelLayout) -> Option<IndexedPixels> {
    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices = Vec::with_capacity(pixels.len() / layout.channels());

    for px in pixels.chunks_exact(layout.channels()) {
        let packed = pack_pixel(px);
        let index = match lookup.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(unpack_pixel(packed));
                lookup.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Collect unique colors per chunk in parallel, then map pixels to indices in parallel.
fn extract_palette_parallel(pixels: &[u8], layout: PixelLayout) -> Option<IndexedPixels> {
    let channels = layout.channels();
    let chunk_pixels = (pixels.len() / channels / rayon::current_num_threads()).max(256);

    let unique: Vec<u32> = pixels
        .par_chunks(chunk_pixels * channels)
        .flat_map_iter(|chunk| {
            let mut local: HashMap<u32, ()> = HashMap::with_capacity(MAX_PALETTE_SIZE);
            for px in chunk.chunks_exact(channels) {
                local.insert(pack_pixel(px), ());
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local.into_keys()
        })
        .collect();

    let mut lookup: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    for packed in unique {
        if lookup.contains_key(&packed) {
            continue;
        }
        if palette.len() >= MAX_PALETTE_SIZE {
            return None;
        }
        lookup.insert(packed, palette.len() as u8);
        palette.push(unpack_pixel(packed));
    }

    let indices: Vec<u8> = pixels
        .par_chunks_exact(channels)
        .map(|px| lookup.get(&pack_pixel(px)).copied().unwrap_or(0))
        .collect();

    Some((palette, indices))
}

fn header(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    ihdr
}

fn physical_dimensions(dpi: u32) -> Vec<u8> {
    let ppm = dpi_to_pixels_per_metre(dpi);
    let mut phys = Vec::with_capacity(9);
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.push(1); // unit: metre
    phys
}

fn encode_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
    layout: PixelLayout,
    dpi: u32,
) -> PosterResult<Vec<u8>> {
    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, 3));
    write_chunk(&mut png, b"pHYs", &physical_dimensions(dpi));

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS marks the image as having alpha, so RGBA input decodes as RGBA
    if layout == PixelLayout::Rgba || palette.iter().any(|c| c[3] < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c[3]).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

fn encode_truecolor(
    pixels: &[u8],
    width: usize,
    height: usize,
    layout: PixelLayout,
    dpi: u32,
) -> PosterResult<Vec<u8>> {
    let mut png = SIGNATURE.to_vec();
    write_chunk(&mut png, b"IHDR", &header(width, height, layout.color_type()));
    write_chunk(&mut png, b"pHYs", &physical_dimensions(dpi));

    let idat = deflate_scanlines(pixels, width * layout.channels(), height)?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);
    Ok(png)
}

/// Prefix each scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> PosterResult<Vec<u8>> {
    let mut raw = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes.max(1)).take(height) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder
        .write_all(&raw)
        .and_then(|_| encoder.finish())
        .map_err(|e| PosterError::Io(format!("IDAT compression failed: {}", e)))
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Read the horizontal resolution from a PNG's `pHYs` chunk, in DPI.
///
/// Returns `None` when the file is not a PNG, has no `pHYs` chunk, or stores
/// an aspect ratio only.
pub fn read_dpi(png: &[u8]) -> Option<u32> {
    if png.get(..8)? != SIGNATURE {
        return None;
    }
    let mut offset = 8;
    while offset + 8 <= png.len() {
        let len = u32::from_be_bytes(png[offset..offset + 4].try_into().ok()?) as usize;
        let chunk_type = &png[offset + 4..offset + 8];
        let data = png.get(offset + 8..offset + 8 + len)?;
        match chunk_type {
            b"pHYs" if len == 9 => {
                if data[8] != 1 {
                    return None;
                }
                let ppm = u32::from_be_bytes(data[0..4].try_into().ok()?);
                return Some(pixels_per_metre_to_dpi(ppm));
            }
            b"IDAT" | b"IEND" => return None,
            _ => offset += 12 + len,
        }
    }
    None
}
