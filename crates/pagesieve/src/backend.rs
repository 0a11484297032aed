//! PDF backend trait.
//!
//! Defines the [`PdfBackend`] trait that abstracts the PDF capabilities the
//! scanner needs: open a document, count its pages, extract per-page text,
//! and copy single pages into an output document that is saved once at the
//! end. The scanner itself never touches a PDF library directly, so the
//! backend is swappable (and mockable in tests).

use std::path::Path;

use crate::error::ScanError;

/// Trait abstracting the PDF operations behind a scan.
///
/// # Associated Types
///
/// - `Document`: an opened source PDF, dropped after its pages are scanned.
/// - `Output`: the growing output document; pages are appended one at a
///   time, in discovery order, and the whole thing is persisted at most once.
/// - `Error`: backend-specific error type, convertible to [`ScanError`].
///
/// Appending must never corrupt already-accumulated output: a failed
/// [`append_page`](PdfBackend::append_page) leaves previously appended
/// pages intact and saveable.
pub trait PdfBackend {
    /// An opened source PDF document.
    type Document;

    /// The output document being accumulated.
    type Output;

    /// Backend-specific error type, convertible to [`ScanError`].
    type Error: std::error::Error + Into<ScanError>;

    /// Open a PDF document from a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid PDF.
    fn open(path: &Path) -> Result<Self::Document, Self::Error>;

    /// Number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Extract plain text from the page at a 0-based index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index is out of range or the page content
    /// cannot be decoded.
    fn page_text(doc: &Self::Document, index: usize) -> Result<String, Self::Error>;

    /// Create a new, empty output document.
    fn new_output() -> Self::Output;

    /// Append a single page of `doc` to the output by copy.
    ///
    /// Pages arrive in discovery order and must be kept in that order.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be copied; already appended pages
    /// remain intact.
    fn append_page(
        out: &mut Self::Output,
        doc: &Self::Document,
        index: usize,
    ) -> Result<(), Self::Error>;

    /// Number of pages appended to the output so far.
    fn output_page_count(out: &Self::Output) -> usize;

    /// Persist the output document to `path`, overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be assembled or written; no
    /// partial file is left behind on assembly failure.
    fn save_output(out: &mut Self::Output, path: &Path) -> Result<(), Self::Error>;
}
