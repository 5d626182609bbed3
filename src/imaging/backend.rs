//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations the pipeline needs
//! from an imaging library: identify, read_exif, and resize.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate. Tests use the `MockBackend` below, which records calls instead of
//! touching pixels.

use super::exif_tags::ExifData;
use super::params::ResizeParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("Failed to encode {format} rendition of {path}: {message}")]
    Encode {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared by every rayon worker.
pub trait ImageBackend: Sync {
    /// Get pixel dimensions of the source image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Read embedded EXIF tags. No EXIF is an empty map, not an error.
    fn read_exif(&self, path: &Path) -> ExifData;

    /// Decode the source, resize to the exact dimensions in `params`, and
    /// return the encoded bytes. The source is decoded afresh on every call.
    fn resize(&self, params: &ResizeParams) -> Result<Vec<u8>, BackendError>;
}
