//! Shared test utilities for the phogg test suite.
//!
//! Builds real image files on disk so classification, EXIF and backend tests
//! exercise the same decoders production does. Everything is synthetic: no
//! binary fixtures are checked in.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! write_test_jpeg(&tmp.path().join("dawn.jpg"), 64, 48);
//! write_test_jpeg_with_exif(
//!     &tmp.path().join("dusk.jpg"),
//!     64,
//!     48,
//!     &minimal_tiff_exif("Leica", "Q2"),
//! );
//! ```

use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::Path;

// =========================================================================
// Image files
// =========================================================================

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

/// Write a small valid JPEG with the given dimensions.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    std::fs::write(path, encode_jpeg(width, height)).unwrap();
}

/// Write a small valid PNG, whatever extension `path` has.
pub fn write_test_png(path: &Path, width: u32, height: u32) {
    let img = gradient(width, height);
    let file = std::fs::File::create(path).unwrap();
    image::codecs::png::PngEncoder::new(std::io::BufWriter::new(file))
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a JPEG carrying `tiff` as its EXIF block.
///
/// The APP1 segment goes straight after SOI, where cameras put it.
pub fn write_test_jpeg_with_exif(path: &Path, width: u32, height: u32, tiff: &[u8]) {
    let jpeg = encode_jpeg(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "encoder output must start with SOI");

    let segment_len = u16::try_from(2 + 6 + tiff.len()).unwrap();
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(tiff);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

// =========================================================================
// EXIF payloads
// =========================================================================

/// Tag number outside every registered EXIF/TIFF range.
pub const PRIVATE_TAG: u16 = 0xC0DE;

/// Big-endian TIFF structure with a single IFD0 holding `Make`, `Model`
/// and one private ASCII tag that readers should not report.
pub fn minimal_tiff_exif(make: &str, model: &str) -> Vec<u8> {
    let entries: [(u16, String); 3] = [
        (0x010F, format!("{make}\0")),
        (0x0110, format!("{model}\0")),
        (PRIVATE_TAG, "vendor\0".to_string()),
    ];

    const HEADER_LEN: usize = 8;
    let ifd_len = 2 + entries.len() * 12 + 4;
    let mut data_offset = HEADER_LEN + ifd_len;

    let mut out = Vec::new();
    out.extend_from_slice(b"MM");
    out.extend_from_slice(&42u16.to_be_bytes());
    out.extend_from_slice(&(HEADER_LEN as u32).to_be_bytes());

    out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
    let mut data = Vec::new();
    for (tag, value) in &entries {
        let bytes = value.as_bytes();
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&2u16.to_be_bytes()); // ASCII
        out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
        if bytes.len() <= 4 {
            let mut inline = [0u8; 4];
            inline[..bytes.len()].copy_from_slice(bytes);
            out.extend_from_slice(&inline);
        } else {
            out.extend_from_slice(&(data_offset as u32).to_be_bytes());
            data.extend_from_slice(bytes);
            data_offset += bytes.len();
        }
    }
    out.extend_from_slice(&0u32.to_be_bytes()); // no IFD1
    out.extend_from_slice(&data);
    out
}

// =========================================================================
// Source directories
// =========================================================================

/// Write `files` into `dir` as JPEGs of the given size, plus a sidecar for
/// each entry that has one.
pub fn populate_source(dir: &Path, files: &[(&str, u32, u32, Option<&str>)]) {
    std::fs::create_dir_all(dir).unwrap();
    for &(name, width, height, sidecar) in files {
        let path = dir.join(name);
        write_test_jpeg(&path, width, height);
        if let Some(text) = sidecar {
            std::fs::write(path.with_extension("txt"), text).unwrap();
        }
    }
}
