//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! (which decides which renditions to create) and the [`backend`](super::backend)
//! (which does the actual pixel work). The split lets tests swap in a mock
//! backend without changing operation logic.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (0–100, default 80). Clamped on construction.
//! - [`OutputFormat`]: Rendition encoding: JPEG or WebP.
//! - [`BoundingBox`]: A `(max_width, max_height)` pair constraining a resize.
//! - [`ResizeParams`]: Everything needed for one rendition: source, exact
//!   output dimensions, format, quality.

use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(80)
    }
}

/// Encoding used for every rendition of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(name = "JPEG")]
    Jpeg,
    #[value(name = "WEBP")]
    WebP,
}

impl OutputFormat {
    /// File extension for renditions in this format (always lowercase).
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Jpeg => f.write_str("JPEG"),
            OutputFormat::WebP => f.write_str("WEBP"),
        }
    }
}

/// Maximum `(width, height)` a rendition must fit.
///
/// Which of the two components actually binds depends on the orientation of
/// the source; see [`limited_size`](super::calculations::limited_size).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Parameters for one rendition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    /// Exact output dimensions, already fitted to the bounding box.
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub quality: Quality,
}
