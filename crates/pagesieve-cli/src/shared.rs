use std::io::{self, IsTerminal, Write};

use pagesieve::Progress;

/// A progress reporter that prints "Scanning file N/M: name..." to stderr,
/// but only when stderr is connected to a TTY (terminal).
pub struct ProgressReporter {
    is_tty: bool,
    enabled: bool,
}

impl ProgressReporter {
    /// Create a reporter; `enabled = false` silences it entirely.
    pub fn new(enabled: bool) -> Self {
        Self {
            is_tty: io::stderr().is_terminal(),
            enabled,
        }
    }

    /// Report progress for one file.
    pub fn report(&self, progress: Progress<'_>) {
        if self.enabled && self.is_tty {
            eprint!(
                "\rScanning file {}/{}: {}...",
                progress.file_index + 1,
                progress.file_count,
                progress.file_name
            );
            let _ = io::stderr().flush();
        }
    }

    /// Clear the progress line.
    pub fn finish(&self) {
        if self.enabled && self.is_tty {
            eprintln!();
        }
    }
}
