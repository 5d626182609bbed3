//! High-level image operations.
//!
//! These functions combine calculations with backend execution. They take a
//! source and its dimensions, compute one [`ResizeParams`] per target
//! resolution, run the backend, and write the results into the
//! per-resolution directory tree.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{TARGET_RESOLUTIONS, limited_size};
use super::params::{OutputFormat, Quality, ResizeParams};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Rendition width → output path for one source image.
pub type RenditionPaths = BTreeMap<u32, PathBuf>;

/// Target width → output directory (`<destination>/img/<width>`).
pub type RenditionDirs = BTreeMap<u32, PathBuf>;

/// Get image dimensions using the backend.
pub fn get_dimensions(backend: &impl ImageBackend, path: &Path) -> Result<(u32, u32)> {
    let dims = backend.identify(path)?;
    Ok((dims.width, dims.height))
}

/// Configuration shared by every rendition of a run.
#[derive(Debug, Clone, Copy)]
pub struct RenditionConfig {
    pub format: OutputFormat,
    pub quality: Quality,
}

/// Name of a rendition file: the source name with its extension replaced.
///
/// `IMG_0042.JPG` → `IMG_0042.jpeg`, `dawn` → `dawn.webp`.
pub fn rendition_file_name(source_file_name: &str, format: OutputFormat) -> String {
    Path::new(source_file_name)
        .with_extension(format.extension())
        .to_string_lossy()
        .into_owned()
}

/// A planned rendition: what to encode and where it goes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRendition {
    pub target_width: u32,
    pub params: ResizeParams,
    pub output: PathBuf,
}

/// Plan every rendition for one source without executing anything.
///
/// One entry per [`TARGET_RESOLUTIONS`] box, largest first. Fails only if
/// `dirs` has no directory for one of the target widths.
pub fn plan_renditions(
    source: &Path,
    source_file_name: &str,
    original_dims: (u32, u32),
    dirs: &RenditionDirs,
    config: &RenditionConfig,
) -> Result<Vec<PlannedRendition>> {
    let file_name = rendition_file_name(source_file_name, config.format);

    TARGET_RESOLUTIONS
        .iter()
        .map(|bbox| -> Result<PlannedRendition> {
            let dir = dirs.get(&bbox.width).ok_or_else(|| {
                BackendError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no output directory for width {}", bbox.width),
                ))
            })?;
            let (width, height) = limited_size(original_dims, *bbox);
            Ok(PlannedRendition {
                target_width: bbox.width,
                params: ResizeParams {
                    source: source.to_path_buf(),
                    width,
                    height,
                    format: config.format,
                    quality: config.quality,
                },
                output: dir.join(&file_name),
            })
        })
        .collect()
}

/// Create one rendition per target resolution.
///
/// Every rendition decodes the source again; no decoded state is carried
/// between resolutions. Output directories must already exist: a missing
/// directory surfaces as an I/O error rather than being created here.
/// Renditions written before a failure are left in place.
pub fn create_renditions(
    backend: &impl ImageBackend,
    source: &Path,
    source_file_name: &str,
    original_dims: (u32, u32),
    dirs: &RenditionDirs,
    config: &RenditionConfig,
) -> Result<RenditionPaths> {
    let plan = plan_renditions(source, source_file_name, original_dims, dirs, config)?;
    let mut paths = RenditionPaths::new();

    for rendition in plan {
        let bytes = backend.resize(&rendition.params)?;
        std::fs::write(&rendition.output, bytes)?;
        paths.insert(rendition.target_width, rendition.output);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use tempfile::TempDir;

    fn make_dirs(root: &Path) -> RenditionDirs {
        TARGET_RESOLUTIONS
            .iter()
            .map(|b| {
                let dir = root.join(b.width.to_string());
                std::fs::create_dir_all(&dir).unwrap();
                (b.width, dir)
            })
            .collect()
    }

    fn jpeg_config() -> RenditionConfig {
        RenditionConfig {
            format: OutputFormat::Jpeg,
            quality: Quality::new(80),
        }
    }

    #[test]
    fn get_dimensions_calls_backend() {
        let backend = MockBackend::with_dimensions(&[("test.jpg", 1920, 1080)]);
        let dims = get_dimensions(&backend, Path::new("/test.jpg")).unwrap();
        assert_eq!(dims, (1920, 1080));
    }

    #[test]
    fn rendition_file_name_rewrites_extension() {
        assert_eq!(rendition_file_name("photo.jpg", OutputFormat::Jpeg), "photo.jpeg");
        assert_eq!(rendition_file_name("IMG_0042.JPG", OutputFormat::WebP), "IMG_0042.webp");
        assert_eq!(rendition_file_name("no-extension", OutputFormat::Jpeg), "no-extension.jpeg");
        assert_eq!(rendition_file_name("v1.2.final.jpg", OutputFormat::Jpeg), "v1.2.final.jpeg");
    }

    #[test]
    fn plan_covers_every_resolution_largest_first() {
        let dirs: RenditionDirs = TARGET_RESOLUTIONS
            .iter()
            .map(|b| (b.width, PathBuf::from(format!("/out/img/{}", b.width))))
            .collect();

        let plan = plan_renditions(
            Path::new("/src/photo.jpg"),
            "photo.jpg",
            (4000, 3000),
            &dirs,
            &jpeg_config(),
        )
        .unwrap();

        let summary: Vec<(u32, u32, u32, &Path)> = plan
            .iter()
            .map(|p| (p.target_width, p.params.width, p.params.height, p.output.as_path()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (1920, 1920, 1440, Path::new("/out/img/1920/photo.jpeg")),
                (1280, 1280, 960, Path::new("/out/img/1280/photo.jpeg")),
                (640, 640, 480, Path::new("/out/img/640/photo.jpeg")),
                (320, 320, 240, Path::new("/out/img/320/photo.jpeg")),
            ]
        );
    }

    #[test]
    fn plan_fails_without_directory_for_width() {
        let mut dirs = RenditionDirs::new();
        dirs.insert(1920, PathBuf::from("/out/img/1920"));

        let result = plan_renditions(
            Path::new("/src/photo.jpg"),
            "photo.jpg",
            (4000, 3000),
            &dirs,
            &jpeg_config(),
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn create_renditions_writes_one_file_per_width() {
        let tmp = TempDir::new().unwrap();
        let dirs = make_dirs(tmp.path());
        let backend = MockBackend::new();

        let paths = create_renditions(
            &backend,
            Path::new("/src/photo.jpg"),
            "photo.jpg",
            (3000, 4000),
            &dirs,
            &RenditionConfig {
                format: OutputFormat::WebP,
                quality: Quality::new(70),
            },
        )
        .unwrap();

        assert_eq!(paths.keys().copied().collect::<Vec<_>>(), vec![320, 640, 1280, 1920]);
        for (width, path) in &paths {
            assert_eq!(path, &tmp.path().join(width.to_string()).join("photo.webp"));
            assert!(path.exists());
        }
        // Mock writes "WxH" as the payload; portrait binds on height
        assert_eq!(std::fs::read_to_string(&paths[&1920]).unwrap(), "810x1080");

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 4);
        assert!(ops.iter().all(|op| matches!(
            op,
            RecordedOp::Resize {
                format: OutputFormat::WebP,
                quality: 70,
                ..
            }
        )));
    }

    #[test]
    fn create_renditions_does_not_create_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let dirs: RenditionDirs = TARGET_RESOLUTIONS
            .iter()
            .map(|b| (b.width, tmp.path().join("missing").join(b.width.to_string())))
            .collect();

        let result = create_renditions(
            &MockBackend::new(),
            Path::new("/src/photo.jpg"),
            "photo.jpg",
            (4000, 3000),
            &dirs,
            &jpeg_config(),
        );

        assert!(matches!(result, Err(BackendError::Io(_))));
        assert!(!tmp.path().join("missing").exists());
    }

    #[test]
    fn create_renditions_stops_at_first_backend_error() {
        let tmp = TempDir::new().unwrap();
        let dirs = make_dirs(tmp.path());
        let backend = MockBackend::new().failing_on("broken.jpg");

        let result = create_renditions(
            &backend,
            Path::new("/src/broken.jpg"),
            "broken.jpg",
            (4000, 3000),
            &dirs,
            &jpeg_config(),
        );

        assert!(matches!(result, Err(BackendError::Decode { .. })));
        assert_eq!(backend.get_operations().len(), 1);
    }
}
