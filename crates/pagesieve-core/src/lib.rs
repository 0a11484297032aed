//! pagesieve-core: Backend-independent matching and date-extraction logic.
//!
//! This crate holds the pure pieces of pagesieve: the multi-notation textual
//! date parser, the match criteria a scan filters pages against, and the
//! result/reporting types. It knows nothing about PDFs; page text arrives
//! as plain strings from whatever backend the scanning layer uses.

pub mod criteria;
pub mod date;
pub mod report;

pub use criteria::MatchCriteria;
pub use date::{month_number, parse_date};
pub use report::{FileError, PageMatch, ScanReport, output_file_name};
