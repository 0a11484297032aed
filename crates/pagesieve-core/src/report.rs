//! Scan result types and output filename derivation.

use std::path::PathBuf;

use chrono::NaiveDate;

/// A per-file failure recorded during a scan.
///
/// These are data, not errors: one unreadable file never aborts the run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileError {
    /// File name (not the full path) of the PDF that failed.
    pub file_name: String,
    /// Human-readable description of what went wrong.
    pub message: String,
}

/// Outcome of a completed scan, sufficient for a caller to render
/// success/failure messaging without touching the file system again.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanReport {
    /// Number of PDF files considered (including ones that failed to open).
    pub files_scanned: usize,
    /// Number of pages copied into the output document.
    pub pages_extracted: usize,
    /// Per-file failures, in encounter order.
    pub errors: Vec<FileError>,
    /// Path the output document was saved to; `None` when nothing matched.
    pub output_path: Option<PathBuf>,
}

impl ScanReport {
    /// `true` when at least one page was extracted.
    pub fn has_matches(&self) -> bool {
        self.pages_extracted > 0
    }
}

/// One matched page, as reported by the dry-run listing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMatch {
    /// File name of the source PDF.
    pub file_name: String,
    /// Zero-based page index within its source document.
    pub page_index: usize,
    /// Date parsed from the page text, when one was found.
    pub date: Option<NaiveDate>,
}

/// Derive the output file name for a normalized search term: spaces become
/// underscores and the name is suffixed `_extracted.pdf`. Deterministic, so
/// re-running a scan overwrites the previous output.
pub fn output_file_name(term: &str) -> String {
    format!("{}_extracted.pdf", term.replace(' ', "_"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_replaces_spaces() {
        assert_eq!(output_file_name("acme corp"), "acme_corp_extracted.pdf");
    }

    #[test]
    fn output_name_single_word() {
        assert_eq!(output_file_name("acme"), "acme_extracted.pdf");
    }

    #[test]
    fn output_name_is_deterministic() {
        assert_eq!(output_file_name("a b c"), output_file_name("a b c"));
    }

    #[test]
    fn default_report_has_no_matches() {
        let report = ScanReport::default();
        assert!(!report.has_matches());
        assert_eq!(report.files_scanned, 0);
        assert!(report.errors.is_empty());
        assert_eq!(report.output_path, None);
    }

    #[test]
    fn report_with_pages_has_matches() {
        let report = ScanReport {
            files_scanned: 3,
            pages_extracted: 2,
            errors: vec![FileError {
                file_name: "bad.pdf".to_string(),
                message: "failed to open".to_string(),
            }],
            output_path: Some(PathBuf::from("/out/acme_extracted.pdf")),
        };
        assert!(report.has_matches());
        assert_eq!(report.errors.len(), 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn page_match_serializes_date_as_iso() {
        let m = PageMatch {
            file_name: "a.pdf".to_string(),
            page_index: 0,
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("2024-03-15"));
    }
}
