//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::style::Palette;
use super::types::{FileEntry, FileStatus, Log, Summary};
use super::utils::log_file_path;
use super::DRY_RUN_TARGET;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger that records per-file outcomes for the closing summary.
///
/// Console and file output go through the [`tracing`] subscriber set up by
/// [`init_subscriber`](super::subscriber::init_subscriber); this type only
/// decides what to emit.
#[derive(Debug)]
pub struct Logger {
    files: Mutex<Vec<FileEntry>>,
    log_file: Option<PathBuf>,
    palette: Palette,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the summary. The file itself
    /// is created by the subscriber.
    #[must_use]
    pub fn new(command: &str, palette: Palette) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
            palette,
        }
    }

    /// Logger that remembers no log file; used where none was opened.
    #[must_use]
    pub fn without_file(palette: Palette) -> Self {
        Self {
            files: Mutex::new(Vec::new()),
            log_file: None,
            palette,
        }
    }

    /// Palette used for the summary lines.
    #[must_use]
    pub const fn palette(&self) -> Palette {
        self.palette
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log what a dry run would have done (console only when verbose).
    pub fn dry_run(&self, msg: &str) {
        tracing::debug!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a file outcome for the summary.
    pub fn record_file(&self, target: &str, status: FileStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.files.lock() {
            guard.push(FileEntry {
                target: target.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a copy of every recorded outcome.
    #[must_use]
    pub fn entries(&self) -> Vec<FileEntry> {
        self.files.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Tally the recorded outcomes.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.files
            .lock()
            .map_or_else(|_| Summary::default(), |g| Summary::from_entries(&g))
    }

    /// Closing lines for a run, given the recorded outcomes.
    ///
    /// Split from [`print_summary`](Self::print_summary) so the wording can
    /// be checked without a subscriber.
    #[must_use]
    pub fn summary_lines(&self, dry_run: bool, verbose: bool) -> Vec<String> {
        let summary = self.summary();
        let p = self.palette;
        let mut lines = Vec::new();

        if summary.updated == 0 && summary.failed == 0 {
            lines.push(p.success("All files are already up to date, you're good!"));
            if !verbose {
                lines.push(p.success("Run again with --verbose if you want to know why."));
            }
        } else if !dry_run && summary.failed == 0 {
            lines.push(p.success("Dotfiles successfully updated!"));
        } else if summary.failed > 0 {
            lines.push(p.failure(&format!(
                "{} of {} file(s) could not be updated.",
                summary.failed,
                summary.updated + summary.failed
            )));
            lines.extend(self.failure_lines());
        }

        if summary.skipped > 0 {
            lines.push(p.success(
                "Run again with --force-templates or --force-all to force-update skipped files.",
            ));
        }
        lines
    }

    /// One line per failed file: its target and, dimmed, what went wrong.
    fn failure_lines(&self) -> Vec<String> {
        let p = self.palette;
        self.entries()
            .into_iter()
            .filter(|e| e.status == FileStatus::Failed)
            .map(|e| {
                let detail = e
                    .message
                    .map(|msg| p.unimportant(&format!(": {msg}")))
                    .unwrap_or_default();
                format!("  {}{detail}", e.target)
            })
            .collect()
    }

    /// Print the closing summary.
    pub fn print_summary(&self, dry_run: bool, verbose: bool) {
        self.info("");
        for line in self.summary_lines(dry_run, verbose) {
            self.info(&line);
        }
        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }

    /// Count the number of failed files.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.summary().failed
    }
}

impl Log for Logger {
    forward_log_methods!(info, debug, warn, error, dry_run);

    fn record_file(&self, target: &str, status: FileStatus, message: Option<&str>) {
        self.record_file(target, status, message);
    }
}
