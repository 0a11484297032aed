//! The scan/filter/extract operation.
//!
//! Walks the PDF files of a source directory in listing order, matches pages
//! against the criteria, copies accepted pages into a single output document,
//! and saves it once at the end. One source document and the output are the
//! only live handles at any point; each source is released before the next
//! file is opened.

use std::fs;
use std::path::{Path, PathBuf};

use pagesieve_core::{FileError, MatchCriteria, PageMatch, ScanReport, output_file_name, parse_date};
use tracing::{debug, trace, warn};

use crate::backend::PdfBackend;
use crate::error::ScanError;
use crate::lopdf_backend::LopdfBackend;

/// Inputs for a scan: where to read, where to write, and what to match.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    /// Directory containing the PDF files to scan.
    pub source_dir: PathBuf,
    /// Directory the output document is written to (created if absent).
    pub dest_dir: PathBuf,
    /// Match criteria (term plus optional date bounds).
    pub criteria: MatchCriteria,
}

/// Inputs for a dry-run listing: like [`ScanRequest`] without a destination.
#[derive(Debug, Clone)]
pub struct FindRequest {
    /// Directory containing the PDF files to scan.
    pub source_dir: PathBuf,
    /// Match criteria (term plus optional date bounds).
    pub criteria: MatchCriteria,
}

/// Progress notification, emitted once per file at the start of its
/// processing. Observation-only; not part of the result contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress<'a> {
    /// Zero-based index of the file being processed.
    pub file_index: usize,
    /// Total number of PDF files in the run.
    pub file_count: usize,
    /// Name of the file being processed.
    pub file_name: &'a str,
}

/// Scan with the default lopdf backend. See [`scan_with_backend`].
///
/// # Errors
///
/// Returns a [`ScanError`] on precondition violation, an empty source
/// directory, or a failed final save. Per-file failures are recorded in the
/// report instead.
pub fn scan(
    request: &ScanRequest,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<ScanReport, ScanError> {
    scan_with_backend::<LopdfBackend>(request, progress)
}

/// Run the scan/filter/extract operation with a specific backend.
///
/// Files are processed in directory-listing order, pages in increasing index
/// order; accepted pages are appended to the output one at a time, so the
/// output page order is exactly the discovery order. The output file is only
/// written when at least one page matched; re-running the same request
/// overwrites the previous output.
///
/// # Errors
///
/// See [`scan`].
pub fn scan_with_backend<B: PdfBackend>(
    request: &ScanRequest,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<ScanReport, ScanError> {
    let criteria = &request.criteria;
    if criteria.is_empty() {
        return Err(ScanError::EmptySearchTerm);
    }
    fs::create_dir_all(&request.dest_dir).map_err(|source| ScanError::CreateDestDir {
        path: request.dest_dir.clone(),
        source,
    })?;

    let files = list_pdf_files(&request.source_dir)?;

    let mut report = ScanReport {
        files_scanned: files.len(),
        ..ScanReport::default()
    };
    let mut output = B::new_output();

    for (file_index, (path, file_name)) in files.iter().enumerate() {
        progress(Progress {
            file_index,
            file_count: files.len(),
            file_name,
        });
        debug!(file = %file_name, "scanning");

        if let Err(err) = scan_file::<B>(path, criteria, &mut output, &mut report) {
            warn!(file = %file_name, error = %err, "skipping file");
            report.errors.push(FileError {
                file_name: file_name.clone(),
                message: err.to_string(),
            });
        }
        // The source document drops here; at most one is ever open.
    }

    if B::output_page_count(&output) == 0 {
        debug!("no pages matched, nothing written");
        return Ok(report);
    }

    let out_path = request.dest_dir.join(output_file_name(criteria.term()));
    B::save_output(&mut output, &out_path).map_err(|e| ScanError::Save {
        path: out_path.clone(),
        message: e.to_string(),
    })?;
    debug!(path = %out_path.display(), pages = report.pages_extracted, "output saved");

    report.output_path = Some(out_path);
    Ok(report)
}

/// List matching pages without building an output document, using the
/// default lopdf backend. See [`find_matches_with_backend`].
///
/// # Errors
///
/// Same terminal errors as [`scan`], minus anything destination-related.
pub fn find_matches(
    request: &FindRequest,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<(Vec<PageMatch>, Vec<FileError>), ScanError> {
    find_matches_with_backend::<LopdfBackend>(request, progress)
}

/// Dry-run variant of the scan: same listing, matching, and filtering, but
/// matches are reported instead of copied. Returns the matches in discovery
/// order together with any per-file errors.
///
/// # Errors
///
/// See [`find_matches`].
pub fn find_matches_with_backend<B: PdfBackend>(
    request: &FindRequest,
    progress: &mut dyn FnMut(Progress<'_>),
) -> Result<(Vec<PageMatch>, Vec<FileError>), ScanError> {
    let criteria = &request.criteria;
    if criteria.is_empty() {
        return Err(ScanError::EmptySearchTerm);
    }
    let files = list_pdf_files(&request.source_dir)?;

    let mut matches = Vec::new();
    let mut errors = Vec::new();

    for (file_index, (path, file_name)) in files.iter().enumerate() {
        progress(Progress {
            file_index,
            file_count: files.len(),
            file_name,
        });

        if let Err(err) = find_in_file::<B>(path, file_name, criteria, &mut matches) {
            warn!(file = %file_name, error = %err, "skipping file");
            errors.push(FileError {
                file_name: file_name.clone(),
                message: err.to_string(),
            });
        }
    }

    Ok((matches, errors))
}

/// List the PDF files of `source_dir` in the order the OS yields them.
///
/// The listing is intentionally not re-sorted: output order follows whatever
/// the environment provides, which is the documented behavior of the scan.
fn list_pdf_files(source_dir: &Path) -> Result<Vec<(PathBuf, String)>, ScanError> {
    if !source_dir.is_dir() {
        return Err(ScanError::SourceDirNotFound(source_dir.to_path_buf()));
    }

    let entries = fs::read_dir(source_dir).map_err(|source| ScanError::ReadDir {
        path: source_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ScanError::ReadDir {
            path: source_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            files.push((path, file_name));
        }
    }

    if files.is_empty() {
        return Err(ScanError::NoPdfFiles(source_dir.to_path_buf()));
    }
    Ok(files)
}

/// Scan one file, appending accepted pages to the output.
///
/// Any backend failure (open, text extraction, page copy) aborts the rest of
/// this file only; pages appended before the failure stay in the output and
/// stay counted.
fn scan_file<B: PdfBackend>(
    path: &Path,
    criteria: &MatchCriteria,
    output: &mut B::Output,
    report: &mut ScanReport,
) -> Result<(), B::Error> {
    let doc = B::open(path)?;
    let page_count = B::page_count(&doc);

    for index in 0..page_count {
        let text = B::page_text(&doc, index)?;
        if !page_accepted(criteria, &text, index) {
            continue;
        }
        B::append_page(output, &doc, index)?;
        report.pages_extracted += 1;
    }
    Ok(())
}

/// Dry-run counterpart of [`scan_file`]: record matches instead of copying.
fn find_in_file<B: PdfBackend>(
    path: &Path,
    file_name: &str,
    criteria: &MatchCriteria,
    matches: &mut Vec<PageMatch>,
) -> Result<(), B::Error> {
    let doc = B::open(path)?;
    let page_count = B::page_count(&doc);

    for index in 0..page_count {
        let text = B::page_text(&doc, index)?;
        if !page_accepted(criteria, &text, index) {
            continue;
        }
        matches.push(PageMatch {
            file_name: file_name.to_string(),
            page_index: index,
            date: parse_date(&text),
        });
    }
    Ok(())
}

/// Apply the criteria to one page's text.
///
/// The date parser only runs for pages that already matched the term and
/// only when a bound was requested; a page without a parsable date is
/// accepted regardless of the bounds.
fn page_accepted(criteria: &MatchCriteria, text: &str, index: usize) -> bool {
    if !criteria.matches_text(text) {
        return false;
    }
    if !criteria.has_date_bounds() {
        trace!(page = index, "matched");
        return true;
    }
    let date = parse_date(text);
    if date.is_none() {
        trace!(page = index, "matched, no parsable date");
    }
    let accepted = criteria.accepts_date(date);
    trace!(page = index, accepted, date = ?date, "date filter");
    accepted
}
