//! Shared types produced by the processing stage and consumed by the
//! renderer and the console output.

use crate::imaging::{ExifData, RenditionPaths};
use crate::metadata::TitleDescription;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One fully processed photo: caption, EXIF tags and every rendition.
///
/// Built once all renditions exist and never mutated afterwards. Collections
/// of records are kept sorted with [`PhotoRecord::by_file_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    caption: TitleDescription,
    exif: ExifData,
    renditions: RenditionPaths,
    /// Basename of the default rendition, cached for sorting.
    file_name: String,
}

impl PhotoRecord {
    /// Returns `None` when `renditions` is empty: a record without any
    /// rendition has nothing to show.
    pub fn new(
        caption: TitleDescription,
        exif: ExifData,
        renditions: RenditionPaths,
    ) -> Option<Self> {
        let (_, default_path) = renditions.first_key_value()?;
        let file_name = default_path.file_name()?.to_string_lossy().into_owned();
        Some(Self {
            caption,
            exif,
            renditions,
            file_name,
        })
    }

    /// Rendition widths, ascending.
    pub fn sizes(&self) -> Vec<u32> {
        self.renditions.keys().copied().collect()
    }

    /// The width used for the gallery's plain `src`: the smallest rendition.
    pub fn default_size(&self) -> u32 {
        // `new` guarantees at least one rendition
        self.renditions.keys().next().copied().unwrap_or_default()
    }

    pub fn default_rendition_path(&self) -> &Path {
        self.renditions
            .values()
            .next()
            .map(PathBuf::as_path)
            .unwrap_or_else(|| Path::new(""))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn all_rendition_paths(&self) -> &RenditionPaths {
        &self.renditions
    }

    pub fn title(&self) -> Option<&str> {
        self.caption.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.caption.description.as_deref()
    }

    pub fn exif_tags(&self) -> &ExifData {
        &self.exif
    }

    /// Sort key comparator: lexicographic by [`file_name`](Self::file_name).
    pub fn by_file_name(a: &Self, b: &Self) -> std::cmp::Ordering {
        a.file_name.cmp(&b.file_name)
    }
}

/// Aggregate numbers for one processing run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    pub photos: usize,
    pub with_title: usize,
    pub with_description: usize,
    pub elapsed: Duration,
}

impl ProcessStats {
    pub fn from_records(records: &[PhotoRecord], elapsed: Duration) -> Self {
        Self {
            photos: records.len(),
            with_title: records.iter().filter(|r| r.title().is_some()).count(),
            with_description: records.iter().filter(|r| r.description().is_some()).count(),
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renditions(stem: &str) -> RenditionPaths {
        [1920, 1280, 640, 320]
            .into_iter()
            .map(|w| (w, PathBuf::from(format!("/out/img/{w}/{stem}.jpeg"))))
            .collect()
    }

    fn record(stem: &str, title: Option<&str>, description: Option<&str>) -> PhotoRecord {
        PhotoRecord::new(
            TitleDescription {
                title: title.map(String::from),
                description: description.map(String::from),
            },
            ExifData::new(),
            renditions(stem),
        )
        .unwrap()
    }

    #[test]
    fn sizes_ascending_and_default_is_smallest() {
        let r = record("photo", None, None);
        assert_eq!(r.sizes(), vec![320, 640, 1280, 1920]);
        assert_eq!(r.default_size(), 320);
        assert_eq!(
            r.default_rendition_path(),
            Path::new("/out/img/320/photo.jpeg")
        );
        assert_eq!(r.file_name(), "photo.jpeg");
        assert_eq!(r.all_rendition_paths().len(), 4);
    }

    #[test]
    fn empty_renditions_yield_no_record() {
        assert!(
            PhotoRecord::new(TitleDescription::default(), ExifData::new(), RenditionPaths::new())
                .is_none()
        );
    }

    #[test]
    fn caption_accessors() {
        let r = record("a", Some("Sunset"), None);
        assert_eq!(r.title(), Some("Sunset"));
        assert_eq!(r.description(), None);
        assert!(r.exif_tags().is_empty());
    }

    #[test]
    fn records_order_by_file_name() {
        let mut records = vec![
            record("b", None, None),
            record("a", None, None),
            record("c", None, None),
        ];
        records.sort_by(PhotoRecord::by_file_name);
        let names: Vec<&str> = records.iter().map(PhotoRecord::file_name).collect();
        assert_eq!(names, vec!["a.jpeg", "b.jpeg", "c.jpeg"]);
    }

    #[test]
    fn stats_count_titles_and_descriptions() {
        let records = vec![
            record("a", Some("A"), Some("first")),
            record("b", Some("B"), None),
            record("c", None, None),
        ];
        let stats = ProcessStats::from_records(&records, Duration::from_millis(1500));
        assert_eq!(stats.photos, 3);
        assert_eq!(stats.with_title, 2);
        assert_eq!(stats.with_description, 1);
        assert_eq!(stats.elapsed, Duration::from_millis(1500));
    }
}
