//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG) | `image` crate, format sniffed from content |
//! | Resize | `image::DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` |
//! | Encode → WebP | `webp` crate (libwebp, lossy) |
//! | EXIF | `kamadak-exif` via [`exif_tags`](super::exif_tags) |
//!
//! Sources are opened with `with_guessed_format` so a JPEG stored under an
//! odd extension decodes the same way discovery classified it.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::exif_tags::{self, ExifData};
use super::params::{OutputFormat, Quality, ResizeParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, BackendError> {
    ImageReader::open(path)?
        .with_guessed_format()
        .map_err(BackendError::Io)
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|e| BackendError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Encode a rendition in the requested format.
///
/// Both encoders take 8-bit RGB; greyscale and CMYK-converted JPEGs are
/// normalised first.
fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    quality: Quality,
    source: &Path,
) -> Result<Vec<u8>, BackendError> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let encode_err = |message: String| BackendError::Encode {
        path: source.to_path_buf(),
        format: format.extension(),
        message,
    };

    match format {
        OutputFormat::Jpeg => {
            let mut buf = Cursor::new(Vec::new());
            // libjpeg-style scale starts at 1
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                &mut buf,
                quality.value().max(1),
            );
            rgb.write_with_encoder(encoder)
                .map_err(|e| encode_err(e.to_string()))?;
            Ok(buf.into_inner())
        }
        OutputFormat::WebP => {
            let encoder = webp::Encoder::from_image(&rgb).map_err(|e| encode_err(e.to_string()))?;
            let encoded = encoder.encode(quality.value() as f32);
            Ok(encoded.to_vec())
        }
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?.into_dimensions().map_err(|e| {
            BackendError::Decode {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        Ok(Dimensions { width, height })
    }

    fn read_exif(&self, path: &Path) -> ExifData {
        exif_tags::read_exif(path)
    }

    fn resize(&self, params: &ResizeParams) -> Result<Vec<u8>, BackendError> {
        let img = load_image(&params.source)?;
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        encode(&resized, params.format, params.quality, &params.source)
    }
}
