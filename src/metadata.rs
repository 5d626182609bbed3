//! Photo title and description from sidecar text files.
//!
//! A photo can carry a human-written title and description in a plain text
//! file next to it, sharing its base name:
//!
//! ```text
//! source/
//! ├── dawn.jpg
//! ├── dawn.txt        ← "Dawn over the harbour\nShot from the north pier."
//! └── mountains.jpg   ← no sidecar: no title, no description
//! ```
//!
//! Only the first two lines matter:
//!
//! - **Line 1** → title
//! - **Line 2** → description
//!
//! Each line is whitespace-trimmed; a blank line leaves that field empty.
//! Anything after line two is ignored, which leaves room for private notes.
//!
//! Titles are never derived from the image itself (no IPTC, no filename
//! fallback). EXIF tags are read separately by
//! [`imaging::exif_tags`](crate::imaging::exif_tags).
//!
//! A missing sidecar is the normal case. A sidecar that exists but cannot be
//! read, or is not valid UTF-8, is an error: silently dropping a caption the
//! photographer wrote is worse than stopping the build.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Failed to read sidecar {path}: {source}")]
    SidecarRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Title and description of a photo, both optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleDescription {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TitleDescription {
    /// Parse sidecar text: first line title, second line description.
    pub fn parse(text: &str) -> Self {
        let mut lines = text.lines().map(non_blank);
        Self {
            title: lines.next().flatten(),
            description: lines.next().flatten(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

fn non_blank(line: &str) -> Option<String> {
    let trimmed = line.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Sidecar path for an image: same path, `.txt` extension.
pub fn sidecar_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("txt")
}

/// Read the sidecar `.txt` file for an image.
///
/// Given `source/dawn.jpg`, looks for `source/dawn.txt`. Returns an empty
/// [`TitleDescription`] when there is no such file.
pub fn read_sidecar(image_path: &Path) -> Result<TitleDescription, MetadataError> {
    let path = sidecar_path(image_path);
    if !path.is_file() {
        return Ok(TitleDescription::default());
    }
    let text = std::fs::read_to_string(&path)
        .map_err(|source| MetadataError::SidecarRead { path, source })?;
    Ok(TitleDescription::parse(&text))
}
