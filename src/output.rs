//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Each photo is shown by its title when it has one, with the source file
//! name as secondary context. Untitled photos fall back to the file name in
//! parentheses, so the console output reads as an inventory of the gallery.
//!
//! # Output Format
//!
//! ```text
//! Creating destination directory site (forcing cleanup)
//! Found 3 photos in photos
//! Sunset (a.jpg)
//!     Renditions: 320px, 640px, 1280px, 1920px
//! (b.jpg)
//!     Renditions: 320px, 640px, 1280px, 1920px
//! ********************************************************************************
//! Processed 3 photos in 4 seconds.
//! 1 photos had a title and 1 of them had a description.
//! ********************************************************************************
//! Generated index.html with 3 photos
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::GenerateSummary;
use crate::process::ProcessEvent;
use crate::types::ProcessStats;
use std::path::Path;

/// Width of the `*` rules framing the statistics.
const RULE_WIDTH: usize = 80;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a photo line: titled photos show title, untitled show filename in parens.
///
/// ```text
/// Sunset (a.jpg)    // titled
/// (a.jpg)           // untitled
/// ```
fn photo_line(title: Option<&str>, file_name: &str) -> String {
    match title {
        Some(t) if !t.is_empty() => format!("{} ({})", t, file_name),
        _ => format!("({})", file_name),
    }
}

// ============================================================================
// Destination
// ============================================================================

pub fn format_destination(path: &Path, force: bool) -> Vec<String> {
    let suffix = if force { " (forcing cleanup)" } else { "" };
    vec![format!(
        "Creating destination directory {}{}",
        path.display(),
        suffix
    )]
}

pub fn print_destination(path: &Path, force: bool) {
    for line in format_destination(path, force) {
        println!("{}", line);
    }
}

// ============================================================================
// Process
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Discovered { source, count } => {
            vec![format!("Found {} photos in {}", count, source.display())]
        }
        ProcessEvent::PhotoProcessed {
            source,
            title,
            widths,
        } => {
            let sizes = widths
                .iter()
                .map(|w| format!("{}px", w))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                photo_line(title.as_deref(), source),
                format!("{}Renditions: {}", indent(1), sizes),
            ]
        }
    }
}

/// Format the end-of-run statistics box.
///
/// Elapsed time is rounded to whole seconds.
pub fn format_statistics(stats: &ProcessStats) -> Vec<String> {
    let rule = "*".repeat(RULE_WIDTH);
    let seconds = stats.elapsed.as_secs_f64().round() as u64;
    vec![
        rule.clone(),
        format!("Processed {} photos in {} seconds.", stats.photos, seconds),
        format!(
            "{} photos had a title and {} of them had a description.",
            stats.with_title, stats.with_description
        ),
        rule,
    ]
}

pub fn print_statistics(stats: &ProcessStats) {
    for line in format_statistics(stats) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format generate stage output.
pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let index_name = summary
        .index
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary.index.display().to_string());

    let mut lines = vec![format!(
        "Generated {} with {} photos",
        index_name, summary.photos
    )];
    if summary.static_files > 0 {
        lines.push(format!("Copied {} static files", summary.static_files));
    }
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn photo_line_with_title() {
        assert_eq!(photo_line(Some("Sunset"), "a.jpg"), "Sunset (a.jpg)");
    }

    #[test]
    fn photo_line_without_title() {
        assert_eq!(photo_line(None, "a.jpg"), "(a.jpg)");
    }

    #[test]
    fn photo_line_with_empty_title() {
        assert_eq!(photo_line(Some(""), "a.jpg"), "(a.jpg)");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn destination_line() {
        let path = Path::new("site");
        assert_eq!(
            format_destination(path, false),
            vec!["Creating destination directory site"]
        );
        assert_eq!(
            format_destination(path, true),
            vec!["Creating destination directory site (forcing cleanup)"]
        );
    }

    // =========================================================================
    // Process event formatting tests
    // =========================================================================

    #[test]
    fn format_discovered() {
        let event = ProcessEvent::Discovered {
            source: PathBuf::from("photos"),
            count: 3,
        };
        assert_eq!(format_process_event(&event), vec!["Found 3 photos in photos"]);
    }

    #[test]
    fn format_photo_processed_with_title() {
        let event = ProcessEvent::PhotoProcessed {
            source: "a.jpg".to_string(),
            title: Some("Sunset".to_string()),
            widths: vec![320, 640, 1280, 1920],
        };
        let lines = format_process_event(&event);
        assert_eq!(lines[0], "Sunset (a.jpg)");
        assert_eq!(lines[1], "    Renditions: 320px, 640px, 1280px, 1920px");
    }

    #[test]
    fn format_photo_processed_without_title() {
        let event = ProcessEvent::PhotoProcessed {
            source: "IMG_0001.JPG".to_string(),
            title: None,
            widths: vec![320],
        };
        let lines = format_process_event(&event);
        assert_eq!(lines, vec!["(IMG_0001.JPG)", "    Renditions: 320px"]);
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    #[test]
    fn statistics_box() {
        let stats = ProcessStats {
            photos: 12,
            with_title: 5,
            with_description: 2,
            elapsed: Duration::from_millis(3600),
        };
        let lines = format_statistics(&stats);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "*".repeat(80));
        assert_eq!(lines[1], "Processed 12 photos in 4 seconds.");
        assert_eq!(
            lines[2],
            "5 photos had a title and 2 of them had a description."
        );
        assert_eq!(lines[3], lines[0]);
    }

    #[test]
    fn statistics_round_down_below_half_second() {
        let stats = ProcessStats {
            elapsed: Duration::from_millis(400),
            ..ProcessStats::default()
        };
        assert_eq!(format_statistics(&stats)[1], "Processed 0 photos in 0 seconds.");
    }

    // =========================================================================
    // Generate output
    // =========================================================================

    #[test]
    fn generate_output_without_static_files() {
        let summary = GenerateSummary {
            index: PathBuf::from("site/index.html"),
            photos: 3,
            static_files: 0,
        };
        assert_eq!(
            format_generate_output(&summary),
            vec!["Generated index.html with 3 photos"]
        );
    }

    #[test]
    fn generate_output_with_static_files() {
        let summary = GenerateSummary {
            index: PathBuf::from("site/index.html"),
            photos: 1,
            static_files: 4,
        };
        let lines = format_generate_output(&summary);
        assert_eq!(lines[1], "Copied 4 static files");
    }
}
