//! EXIF tag extraction.
//!
//! Reads the embedded EXIF block from a JPEG (APP1) through `kamadak-exif` and
//! flattens it to a `tag name → display value` map for the gallery template.
//! Text tags are unquoted; numeric and rational tags use the reader's own
//! formatting with units (`f/2.8`, `1/250 s`).
//!
//! Only tags the reader has a registered name for are kept. Maker notes,
//! vendor-private and otherwise unknown numeric tags are dropped: they render
//! as opaque `Tag(Exif, 59932)` labels and mean nothing to a visitor.
//!
//! Both the primary image IFD and the thumbnail IFD are read by the parser;
//! when a tag appears in both, the primary image value wins.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// EXIF tag name → human readable value (units included where defined).
pub type ExifData = BTreeMap<String, String>;

/// Read EXIF tags from an image file.
///
/// Returns an empty map when the file carries no EXIF block. A present but
/// malformed block is logged and also yields an empty map: broken metadata
/// is no reason to drop an otherwise decodable photo. Failing to open the
/// file at all is left to the decoder to report.
pub fn read_exif(path: &Path) -> ExifData {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(_) => return ExifData::new(),
    };
    let mut reader = BufReader::new(file);

    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return ExifData::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable EXIF block");
            return ExifData::new();
        }
    };

    collect_known_tags(&exif)
}

/// Parse EXIF from a raw TIFF-structured buffer (the APP1 payload after `Exif\0\0`).
#[cfg(test)]
fn read_exif_raw(data: Vec<u8>) -> ExifData {
    match exif::Reader::new().read_raw(data) {
        Ok(exif) => collect_known_tags(&exif),
        Err(_) => ExifData::new(),
    }
}

fn collect_known_tags(exif: &exif::Exif) -> ExifData {
    let mut tags = ExifData::new();

    // Primary image first so its values shadow the thumbnail IFD's.
    let mut fields: Vec<&exif::Field> = exif.fields().collect();
    fields.sort_by_key(|f| f.ifd_num != exif::In::PRIMARY);

    for field in fields {
        if field.tag.description().is_none() {
            continue;
        }
        tags.entry(field.tag.to_string())
            .or_insert_with(|| display_value(field, exif));
    }
    tags
}

/// Text tags are shown bare; everything else uses the reader's formatting.
fn display_value(field: &exif::Field, exif: &exif::Exif) -> String {
    match &field.value {
        exif::Value::Ascii(parts) => parts
            .iter()
            .map(|p| String::from_utf8_lossy(p).trim_end_matches('\0').trim().to_string())
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        _ => field.display_value().with_unit(exif).to_string(),
    }
}
