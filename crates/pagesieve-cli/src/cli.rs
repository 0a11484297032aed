use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Extract matching invoice pages from folders of PDF files.
#[derive(Debug, Parser)]
#[command(name = "pagesieve", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan a folder and assemble matching pages into one output PDF
    Extract {
        /// Folder containing the PDF files to scan
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,

        /// Folder the output PDF is written to (created if missing)
        #[arg(value_name = "DEST_DIR")]
        dest_dir: PathBuf,

        /// Customer name or account id to search for (case-insensitive)
        #[arg(value_name = "SEARCH")]
        search: String,

        /// Only keep pages dated on or after this date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        /// Only keep pages dated on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,

        /// Suppress per-file progress output
        #[arg(long)]
        quiet: bool,
    },

    /// List matching pages without writing an output PDF
    Find {
        /// Folder containing the PDF files to scan
        #[arg(value_name = "SOURCE_DIR")]
        source_dir: PathBuf,

        /// Customer name or account id to search for (case-insensitive)
        #[arg(value_name = "SEARCH")]
        search: String,

        /// Only list pages dated on or after this date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        /// Only list pages dated on or before this date (YYYY-MM-DD)
        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for the find subcommand.
#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines
    Text,
    /// One JSON array of match objects
    Json,
}
