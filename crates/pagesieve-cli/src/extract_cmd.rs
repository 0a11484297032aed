use std::path::Path;

use chrono::NaiveDate;
use pagesieve::{MatchCriteria, ScanRequest, scan};

use crate::shared::ProgressReporter;

pub fn run(
    source_dir: &Path,
    dest_dir: &Path,
    search: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    quiet: bool,
) -> Result<(), i32> {
    let request = ScanRequest {
        source_dir: source_dir.to_path_buf(),
        dest_dir: dest_dir.to_path_buf(),
        criteria: MatchCriteria::new(search, from, to),
    };

    let progress = ProgressReporter::new(!quiet);
    let result = scan(&request, &mut |p| progress.report(p));
    // Terminate the progress line before printing anything else.
    progress.finish();
    let report = result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    println!("Files scanned:   {}", report.files_scanned);
    println!("Pages extracted: {}", report.pages_extracted);
    match &report.output_path {
        Some(path) => println!("Output:          {}", path.display()),
        None => println!("No matching pages found; no output written."),
    }

    if !report.errors.is_empty() {
        eprintln!("\n{} file(s) could not be processed:", report.errors.len());
        for err in &report.errors {
            eprintln!("  {}: {}", err.file_name, err.message);
        }
    }

    Ok(())
}
