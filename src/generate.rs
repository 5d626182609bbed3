//! HTML gallery generation.
//!
//! Takes the processed [`PhotoRecord`]s and the site config and writes a
//! single-page static gallery into the destination directory.
//!
//! ## Output Structure
//!
//! ```text
//! destination/
//! ├── index.html        # Every photo, in file-name order
//! ├── style.css         # Embedded stylesheet
//! ├── img/              # Renditions (written by the process stage)
//! │   └── ...
//! └── ...               # Contents of `static_dir`, if configured
//! ```
//!
//! ## Page Content
//!
//! - **Header**: `title` (default "Gallery") and `description` rendered as
//!   Markdown
//! - **Photos**: one `<figure>` per photo. `src` is the default rendition,
//!   `srcset` lists every rendition with its width descriptor so the browser
//!   picks the right size. Title and description become the caption; EXIF
//!   tags sit in a collapsed `<details>` table.
//! - **Footer**: `author`, when set
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::SiteConfig;
use crate::imaging::ExifData;
use crate::types::PhotoRecord;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Rendition {0} is not inside the destination directory")]
    OutsideDestination(PathBuf),
    #[error("Static directory not found: {0}")]
    StaticDirNotFound(PathBuf),
    #[error("Failed to copy static files: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const DEFAULT_TITLE: &str = "Gallery";
const IMG_SIZES: &str = "(max-width: 800px) 100vw, 80vw";

/// What [`generate`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub index: PathBuf,
    pub photos: usize,
    /// Files copied from `static_dir`; 0 when not configured.
    pub static_files: usize,
}

/// A photo as the page shows it: URLs relative to the destination.
#[derive(Debug)]
struct PhotoView<'a> {
    src: String,
    srcset: String,
    alt: &'a str,
    title: Option<&'a str>,
    description: Option<&'a str>,
    exif: &'a ExifData,
}

pub fn generate(
    photos: &[PhotoRecord],
    site_config: &SiteConfig,
    destination: &Path,
) -> Result<GenerateSummary, GenerateError> {
    let views = photos
        .iter()
        .map(|photo| photo_view(photo, destination))
        .collect::<Result<Vec<_>, _>>()?;

    let index = destination.join("index.html");
    fs::write(&index, render_index(&views, site_config).into_string())?;
    fs::write(destination.join("style.css"), CSS_STATIC)?;
    debug!(path = %index.display(), photos = views.len(), "wrote index");

    let static_files = match site_config.get_str("static_dir") {
        Some(dir) => copy_static_dir(Path::new(dir), destination)?,
        None => 0,
    };

    Ok(GenerateSummary {
        index,
        photos: views.len(),
        static_files,
    })
}

/// URL of `path` relative to `destination`, always with `/` separators.
fn relative_url(path: &Path, destination: &Path) -> Result<String, GenerateError> {
    let relative = path
        .strip_prefix(destination)
        .map_err(|_| GenerateError::OutsideDestination(path.to_path_buf()))?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn photo_view<'a>(
    photo: &'a PhotoRecord,
    destination: &Path,
) -> Result<PhotoView<'a>, GenerateError> {
    let src = relative_url(photo.default_rendition_path(), destination)?;
    let srcset = photo
        .all_rendition_paths()
        .iter()
        .map(|(width, path)| -> Result<String, GenerateError> {
            Ok(format!("{} {}w", relative_url(path, destination)?, width))
        })
        .collect::<Result<Vec<_>, _>>()?
        .join(", ");

    Ok(PhotoView {
        src,
        srcset,
        alt: photo.title().unwrap_or(photo.file_name()),
        title: photo.title(),
        description: photo.description(),
        exif: photo.exif_tags(),
    })
}

/// Copy everything under `src` into `destination`, keeping the layout.
fn copy_static_dir(src: &Path, destination: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Err(GenerateError::StaticDirNotFound(src.to_path_buf()));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = destination.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    debug!(src = %src.display(), files = copied, "copied static files");
    Ok(copied)
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="style.css";
            }
            body {
                (content)
            }
        }
    }
}

fn exif_table(tags: &ExifData) -> Markup {
    html! {
        details.exif {
            summary { "EXIF" }
            table {
                @for (tag, value) in tags {
                    tr {
                        th scope="row" { (tag) }
                        td { (value) }
                    }
                }
            }
        }
    }
}

fn render_photo(photo: &PhotoView) -> Markup {
    html! {
        figure.photo {
            img src=(photo.src) srcset=(photo.srcset) sizes=(IMG_SIZES) alt=(photo.alt) loading="lazy";
            @if photo.title.is_some() || photo.description.is_some() {
                figcaption {
                    @if let Some(title) = photo.title {
                        span.photo-title { (title) }
                    }
                    @if let Some(description) = photo.description {
                        p.photo-description { (description) }
                    }
                }
            }
            @if !photo.exif.is_empty() {
                (exif_table(photo.exif))
            }
        }
    }
}

/// Renders the gallery page
fn render_index(photos: &[PhotoView], config: &SiteConfig) -> Markup {
    let title = config.get_str("title").unwrap_or(DEFAULT_TITLE);
    let description = config.get_str("description").map(markdown_to_html);

    let content = html! {
        header.site-header {
            h1 { (title) }
            @if let Some(description) = description {
                div.site-description { (PreEscaped(description)) }
            }
        }
        main.gallery {
            @for photo in photos {
                (render_photo(photo))
            }
        }
        @if let Some(author) = config.get_str("author") {
            footer.site-footer { "© " (author) }
        }
    };

    base_document(title, content)
}

// ============================================================================
// Tests
// ============================================================================
