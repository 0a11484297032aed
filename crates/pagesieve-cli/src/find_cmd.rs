use std::path::Path;

use chrono::NaiveDate;
use pagesieve::{FindRequest, MatchCriteria, find_matches};

use crate::cli::OutputFormat;
use crate::shared::ProgressReporter;

pub fn run(
    source_dir: &Path,
    search: &str,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    format: &OutputFormat,
) -> Result<(), i32> {
    let request = FindRequest {
        source_dir: source_dir.to_path_buf(),
        criteria: MatchCriteria::new(search, from, to),
    };

    let progress = ProgressReporter::new(true);
    let result = find_matches(&request, &mut |p| progress.report(p));
    // Terminate the progress line before printing anything else.
    progress.finish();
    let (matches, errors) = result.map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;

    match format {
        OutputFormat::Text => {
            println!("file\tpage\tdate");
            for m in &matches {
                let date = m
                    .date
                    .map_or_else(|| "-".to_string(), |d| d.to_string());
                println!("{}\t{}\t{}", m.file_name, m.page_index + 1, date);
            }
        }
        OutputFormat::Json => {
            let json_str = serde_json::to_string(&matches).unwrap();
            println!("{json_str}");
        }
    }

    for err in &errors {
        eprintln!("Warning: {}: {}", err.file_name, err.message);
    }

    Ok(())
}
