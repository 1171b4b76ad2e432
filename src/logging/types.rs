//! Core logging types: per-file outcomes, the run summary, and the [`Log`] trait.

/// Outcome of one installed file, recorded for the closing summary.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Home-relative display path of the target.
    pub target: String,
    /// What happened to it.
    pub status: FileStatus,
    /// Optional detail (skip reason or error description).
    pub message: Option<String>,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The target was installed or overwritten (or would be, in a dry run).
    Updated,
    /// The target already existed and was left alone.
    Skipped,
    /// Applying the change failed.
    Failed,
}

/// Counts of recorded outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Files installed or overwritten.
    pub updated: usize,
    /// Files left alone.
    pub skipped: usize,
    /// Files whose change failed.
    pub failed: usize,
}

impl Summary {
    /// Tally a list of recorded entries.
    #[must_use]
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            match entry.status {
                FileStatus::Updated => acc.updated += 1,
                FileStatus::Skipped => acc.skipped += 1,
                FileStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation; the
/// install command only depends on this trait.
pub trait Log: Send + Sync {
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (shown on console only when verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log what a dry run would have done.
    fn dry_run(&self, msg: &str);
    /// Record a file outcome for the summary.
    fn record_file(&self, target: &str, status: FileStatus, message: Option<&str>);
}
