//! pagesieve: Scan folders of PDF invoices and assemble matching pages into
//! a single PDF.
//!
//! The scanner walks the PDF files of a source directory, matches each
//! page's text against a [`MatchCriteria`] (case-insensitive substring term,
//! optional inclusive date range parsed from the page text), and copies the
//! accepted pages, in discovery order, into one output document.
//!
//! PDF reading and writing sit behind the [`PdfBackend`] trait; the default
//! implementation is [`LopdfBackend`].
//!
//! # Example
//!
//! ```ignore
//! use pagesieve::{MatchCriteria, ScanRequest, scan};
//!
//! let request = ScanRequest {
//!     source_dir: "invoices/".into(),
//!     dest_dir: "out/".into(),
//!     criteria: MatchCriteria::new("acme corp", None, None),
//! };
//! let report = scan(&request, &mut |p| {
//!     eprintln!("file {}/{}: {}", p.file_index + 1, p.file_count, p.file_name);
//! })?;
//! println!("{} pages extracted", report.pages_extracted);
//! # Ok::<(), pagesieve::ScanError>(())
//! ```

pub mod backend;
pub mod error;
pub mod lopdf_backend;
pub mod scanner;

pub use backend::PdfBackend;
pub use error::{BackendError, ScanError};
pub use lopdf_backend::{LopdfBackend, LopdfSource, OutputAccumulator};
pub use scanner::{
    FindRequest, Progress, ScanRequest, find_matches, find_matches_with_backend, scan,
    scan_with_backend,
};

// Re-export the core types callers need to build requests and read reports.
pub use pagesieve_core::{
    FileError, MatchCriteria, PageMatch, ScanReport, output_file_name, parse_date,
};
