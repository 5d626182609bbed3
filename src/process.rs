//! Photo discovery and rendition generation.
//!
//! Takes a flat source directory of photographs and produces, for each one,
//! a resized copy at every target resolution plus a [`PhotoRecord`] carrying
//! its caption and EXIF tags.
//!
//! ## Output Structure
//!
//! ```text
//! destination/
//! └── img/
//!     ├── 1920/
//!     │   ├── dawn.jpeg
//!     │   └── mountains.jpeg
//!     ├── 1280/
//!     ├── 640/
//!     └── 320/
//! ```
//!
//! ## Steps
//!
//! 1. **Discover**: direct children of the source directory whose content is
//!    JPEG, sorted by file name. Extensions are ignored.
//! 2. **Prepare**: create `img/<width>` for every target width, once, before
//!    any photo is touched.
//! 3. **Process**: per photo, read the sidecar, read EXIF, identify, and write
//!    every rendition. Photos run in parallel on the rayon global pool.
//! 4. **Collect**: sort records by file name and compute [`ProcessStats`].
//!
//! The first failure aborts the run. Files already written stay on disk.

use crate::imaging::{
    BackendError, ImageBackend, OutputFormat, Quality, RenditionConfig, RenditionDirs,
    RustBackend, TARGET_RESOLUTIONS, create_renditions, get_dimensions, is_supported_image,
    rendition_file_name,
};
use crate::metadata::{self, MetadataError};
use crate::types::{PhotoRecord, ProcessStats};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot read source directory {path}: {source}")]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{first} and {second} would both be written as {output}")]
    NameCollision {
        first: String,
        second: String,
        output: String,
    },
    #[error("{0} already exists")]
    DestinationExists(PathBuf),
    #[error("Failed to create output directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encoding settings for a processing run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessConfig {
    pub format: OutputFormat,
    pub quality: Quality,
}

impl ProcessConfig {
    fn rendition_config(&self) -> RenditionConfig {
        RenditionConfig {
            format: self.format,
            quality: self.quality,
        }
    }
}

/// Progress events sent while processing.
///
/// Photos finish in whatever order the workers get to them, so
/// `PhotoProcessed` events are not sorted.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    Discovered { source: PathBuf, count: usize },
    PhotoProcessed {
        source: String,
        title: Option<String>,
        widths: Vec<u32>,
    },
}

/// Everything a successful run produced.
#[derive(Debug)]
pub struct ProcessResult {
    /// Sorted by file name.
    pub photos: Vec<PhotoRecord>,
    pub stats: ProcessStats,
}

/// List the processable photos in `source_dir`, sorted by file name.
///
/// Only direct children are considered. Subdirectories, sidecars and files
/// whose content is not JPEG are skipped.
pub fn discover_photos(source_dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let discovery_err = |source| ProcessError::Discovery {
        path: source_dir.to_path_buf(),
        source,
    };

    let mut photos = Vec::new();
    for entry in std::fs::read_dir(source_dir).map_err(discovery_err)? {
        let path = entry.map_err(discovery_err)?.path();
        if is_supported_image(&path) {
            photos.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-JPEG entry");
        }
    }
    photos.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(photos)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Fail if two sources would write the same rendition file.
///
/// `dawn.jpg` and `dawn.jpeg` both become `dawn.jpeg`; the second would
/// silently overwrite the first.
pub fn check_name_collisions(
    sources: &[PathBuf],
    format: OutputFormat,
) -> Result<(), ProcessError> {
    let mut seen: HashMap<String, String> = HashMap::new();
    for source in sources {
        let name = file_name_of(source);
        let output = rendition_file_name(&name, format);
        if let Some(first) = seen.insert(output.clone(), name.clone()) {
            return Err(ProcessError::NameCollision {
                first,
                second: name,
                output,
            });
        }
    }
    Ok(())
}

/// Make `destination` an empty directory.
///
/// An existing destination is an error unless `force` is set, in which case
/// it is removed first. Parents are created as needed.
pub fn prepare_destination(destination: &Path, force: bool) -> Result<(), ProcessError> {
    if destination.exists() {
        if !force {
            return Err(ProcessError::DestinationExists(destination.to_path_buf()));
        }
        debug!(path = %destination.display(), "removing existing destination");
        std::fs::remove_dir_all(destination)?;
    }
    std::fs::create_dir_all(destination).map_err(|source| ProcessError::DirectoryCreation {
        path: destination.to_path_buf(),
        source,
    })
}

/// Create `destination/img/<width>` for every target width.
///
/// `destination` must exist. Nothing here creates parents, and an existing
/// `img` directory is an error: each directory is made exactly once.
pub fn create_rendition_dirs(destination: &Path) -> Result<RenditionDirs, ProcessError> {
    let create = |path: PathBuf| -> Result<PathBuf, ProcessError> {
        std::fs::create_dir(&path)
            .map_err(|source| ProcessError::DirectoryCreation {
                path: path.clone(),
                source,
            })
            .map(|()| path)
    };

    let img_root = create(destination.join("img"))?;
    TARGET_RESOLUTIONS
        .iter()
        .map(|bbox| -> Result<(u32, PathBuf), ProcessError> {
            Ok((bbox.width, create(img_root.join(bbox.width.to_string()))?))
        })
        .collect()
}

pub fn process(
    source_dir: &Path,
    destination_dir: &Path,
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, source_dir, destination_dir, config, events)
}

/// Process photos using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    source_dir: &Path,
    destination_dir: &Path,
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessResult, ProcessError> {
    let started = Instant::now();

    let sources = discover_photos(source_dir)?;
    check_name_collisions(&sources, config.format)?;
    debug!(source = %source_dir.display(), count = sources.len(), "discovered photos");
    if let Some(tx) = &events {
        tx.send(ProcessEvent::Discovered {
            source: source_dir.to_path_buf(),
            count: sources.len(),
        })
        .ok();
    }

    let dirs = create_rendition_dirs(destination_dir)?;
    let rendition_config = config.rendition_config();

    let mut photos: Vec<PhotoRecord> = sources
        .par_iter()
        .map(|source| -> Result<PhotoRecord, ProcessError> {
            let record = process_photo(backend, source, &dirs, &rendition_config)?;
            if let Some(tx) = &events {
                tx.send(ProcessEvent::PhotoProcessed {
                    source: file_name_of(source),
                    title: record.title().map(String::from),
                    widths: record.sizes(),
                })
                .ok();
            }
            Ok(record)
        })
        .collect::<Result<_, _>>()?;

    photos.sort_by(PhotoRecord::by_file_name);
    let stats = ProcessStats::from_records(&photos, started.elapsed());

    Ok(ProcessResult { photos, stats })
}

fn process_photo(
    backend: &impl ImageBackend,
    source: &Path,
    dirs: &RenditionDirs,
    config: &RenditionConfig,
) -> Result<PhotoRecord, ProcessError> {
    let file_name = file_name_of(source);

    let caption = metadata::read_sidecar(source)?;
    let exif = backend.read_exif(source);
    let dims = get_dimensions(backend, source)?;
    debug!(photo = %file_name, width = dims.0, height = dims.1, tags = exif.len(), "identified");

    let renditions = create_renditions(backend, source, &file_name, dims, dirs, config)?;

    PhotoRecord::new(caption, exif, renditions).ok_or_else(|| {
        ProcessError::Io(std::io::Error::other(format!(
            "no renditions written for {file_name}"
        )))
    })
}
