//! # phogg
//!
//! A photo gallery generator. Point it at a flat folder of photographs and it
//! writes a static HTML gallery: every photo resized to a fixed set of
//! resolutions, captioned from optional sidecar text files, with its EXIF
//! tags one click away.
//!
//! # Architecture: Two Stages
//!
//! ```text
//! 1. Process   source/  →  destination/img/<width>/   (discover, caption, resize)
//! 2. Generate  records  →  destination/index.html     (render the page)
//! ```
//!
//! Stage 1 returns a sorted list of [`types::PhotoRecord`]s plus
//! [`types::ProcessStats`]; stage 2 renders those records. Nothing is
//! serialized in between: the binary runs both stages in one process.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | Stage 1: discovery, directory preparation, parallel per-photo work |
//! | [`generate`] | Stage 2: renders `index.html` with Maud, copies static files |
//! | [`imaging`] | Content sniffing, EXIF, size calculations, resize + encode backends |
//! | [`metadata`] | Title and description from `.txt` sidecars |
//! | [`types`] | `PhotoRecord` and run statistics |
//! | [`config`] | `site.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Content, Not Extensions
//!
//! A file is a photo when its first bytes say JPEG. `IMG_0042.JPG`, `scan`
//! and `export.bin` are all accepted if they hold JPEG data; a PNG renamed
//! to `.jpg` is skipped.
//!
//! ## Fixed Resolutions
//!
//! Every photo is fitted into the same four boxes, 1920×1080 down to 320×180
//! (see [`imaging::TARGET_RESOLUTIONS`]). Landscape photos are bound by the
//! box width, portrait and square ones by the box height. The page lets the
//! browser choose between them with `srcset`.
//!
//! ## Fail Whole
//!
//! One unreadable photo or sidecar aborts the run. A gallery that silently
//! drops pictures is harder to notice than an error message.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system. Malformed markup is a build error and all interpolation is
//! auto-escaped, so captions cannot inject HTML.

pub mod config;
pub mod generate;
pub mod imaging;
pub mod metadata;
pub mod output;
pub mod process;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
