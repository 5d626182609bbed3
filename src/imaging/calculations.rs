//! Pure calculation functions for rendition dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::BoundingBox;

/// Target resolutions every source is rendered at, largest first.
///
/// The widths double as the names of the per-resolution output directories
/// (`img/1920/`, `img/1280/`, ...), so they must stay unique.
pub const TARGET_RESOLUTIONS: [BoundingBox; 4] = [
    BoundingBox::new(1920, 1080),
    BoundingBox::new(1280, 720),
    BoundingBox::new(640, 360),
    BoundingBox::new(320, 180),
];

/// Whether a source should be treated as landscape.
///
/// Strictly wider than tall. Square sources take the portrait branch.
pub fn is_landscape(width: u32, height: u32) -> bool {
    width > height
}

/// Calculate the rendition size for a source inside a bounding box.
///
/// Orientation decides which side of the box binds:
/// - landscape: output width is `bbox.width`, height follows the aspect ratio
/// - portrait or square: output height is `bbox.height`, width follows
///
/// The derived side is truncated, never rounded, and never drops below one
/// pixel. Note this is not a "fit inside" policy: a 3000x4000 portrait in a
/// 1920x1080 box becomes 810x1080, while a very wide landscape may exceed
/// `bbox.height`.
///
/// # Examples
/// ```
/// # use phogg::imaging::{BoundingBox, limited_size};
/// assert_eq!(limited_size((4000, 3000), BoundingBox::new(1920, 1080)), (1920, 1440));
/// assert_eq!(limited_size((3000, 4000), BoundingBox::new(1920, 1080)), (810, 1080));
/// ```
pub fn limited_size(original: (u32, u32), bbox: BoundingBox) -> (u32, u32) {
    let (orig_w, orig_h) = original;
    let aspect = orig_w as f64 / orig_h as f64;

    if is_landscape(orig_w, orig_h) {
        let h = (bbox.width as f64 / aspect) as u32;
        (bbox.width, h.max(1))
    } else {
        let w = (bbox.height as f64 * aspect) as u32;
        (w.max(1), bbox.height)
    }
}
