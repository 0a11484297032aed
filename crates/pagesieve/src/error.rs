//! Error types for the scanning layer.
//!
//! [`ScanError`] covers the terminal failures of a scan: precondition
//! violations before any file I/O, and the final save step. Per-file
//! failures are not errors; they land in the report as
//! [`FileError`](pagesieve_core::FileError) entries and the run continues.

use std::path::PathBuf;

use thiserror::Error;

/// Terminal errors for a scan operation.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The search term was empty after trimming.
    #[error("search term is empty")]
    EmptySearchTerm,

    /// The source path does not exist or is not a directory.
    #[error("source directory not found: {0}")]
    SourceDirNotFound(PathBuf),

    /// The destination directory could not be created.
    #[error("failed to create destination directory {path}: {source}")]
    CreateDestDir {
        /// The destination path that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source directory could not be listed.
    #[error("failed to read source directory {path}: {source}")]
    ReadDir {
        /// The source path that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source directory contains no PDF files.
    #[error("no PDF files found in {0}")]
    NoPdfFiles(PathBuf),

    /// The accumulated output document could not be saved.
    #[error("failed to save output to {path}: {message}")]
    Save {
        /// Intended output path.
        path: PathBuf,
        /// Backend description of the failure.
        message: String,
    },

    /// A backend failure outside the per-file recovery scope.
    #[error("PDF backend error: {0}")]
    Backend(String),
}

/// Error type for lopdf-backed document operations.
///
/// Distinguishes open failures from text-extraction and page-copy failures
/// so the scanner can report them meaningfully per file.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The document could not be opened or parsed.
    #[error("failed to open PDF: {0}")]
    Open(String),

    /// Text could not be extracted from a page.
    #[error("failed to extract text from page {page}: {message}")]
    Extract {
        /// Zero-based page index.
        page: usize,
        /// Backend description of the failure.
        message: String,
    },

    /// A page could not be copied into the output document.
    #[error("failed to copy page {page}: {message}")]
    CopyPage {
        /// Zero-based page index.
        page: usize,
        /// Backend description of the failure.
        message: String,
    },

    /// The output document could not be written.
    #[error("failed to write output: {0}")]
    Write(String),

    /// I/O error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<BackendError> for ScanError {
    fn from(err: BackendError) -> Self {
        ScanError::Backend(err.to_string())
    }
}
