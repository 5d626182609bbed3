//! Image processing: classification, metadata, resizing and encoding.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Classify** | `image::guess_format` on the first bytes of the file |
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **EXIF** | `kamadak-exif` |
//! | **Resize → JPEG/WebP** | Lanczos3 + `JpegEncoder` / libwebp |
//!
//! The module is split into:
//! - **Classify**: content sniffing for discovery
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: High-level functions combining calculations + backend

pub mod backend;
mod calculations;
pub mod classify;
pub mod exif_tags;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{TARGET_RESOLUTIONS, is_landscape, limited_size};
pub use classify::is_supported_image;
pub use exif_tags::ExifData;
pub use operations::{
    RenditionConfig, RenditionDirs, RenditionPaths, create_renditions, get_dimensions,
    plan_renditions, rendition_file_name,
};
pub use params::{BoundingBox, OutputFormat, Quality, ResizeParams};
pub use rust_backend::RustBackend;
