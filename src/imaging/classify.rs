//! Content-based source image detection.
//!
//! Photographers' folders are full of files with misleading names: exports
//! renamed by hand, PNG screenshots saved as `.jpg`, sidecars, `.DS_Store`.
//! Discovery therefore never trusts the extension. Only the leading bytes of
//! the file decide, using the `image` crate's signature table.

use image::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a file for sniffing. Enough for every
/// signature `image::guess_format` knows about.
const SNIFF_LEN: usize = 16;

/// Formats accepted as pipeline input.
const SUPPORTED_INPUT_FORMATS: &[ImageFormat] = &[ImageFormat::Jpeg];

/// Returns true if `path` is a regular file whose content is a supported image.
///
/// Never fails: directories, unreadable entries and files too short to carry a
/// signature are simply not images.
pub fn is_supported_image(path: &Path) -> bool {
    sniff_format(path).is_some_and(|format| SUPPORTED_INPUT_FORMATS.contains(&format))
}

/// Guess the image format of a file from its first bytes.
pub fn sniff_format(path: &Path) -> Option<ImageFormat> {
    // Opening a FIFO blocks until a writer shows up, so check the type first.
    if !std::fs::metadata(path).ok()?.is_file() {
        return None;
    }
    let mut file = File::open(path).ok()?;

    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.by_ref()
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut head)
        .ok()?;

    image::guess_format(&head).ok()
}
