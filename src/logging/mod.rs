//! Logging infrastructure for console and file output.

mod logger;
mod style;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use style::Palette;
pub use subscriber::init_subscriber;
pub use types::{FileEntry, FileStatus, Log, Summary};

/// Tracing target for dry-run previews, emitted at `debug`.
pub(crate) const DRY_RUN_TARGET: &str = "dotfiles_installer::dry_run";

/// Install a thread-local subscriber that appends every event to a log file
/// inside a fresh temp directory.
///
/// The returned guard restores the previous dispatcher when dropped.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_file_log() -> (
    std::path::PathBuf,
    tempfile::TempDir,
    tracing::dispatcher::DefaultGuard,
) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("test.log");
    let file_layer = subscriber::FileLayer::at(&path).expect("failed to create file layer");
    let subscriber = tracing_subscriber::registry()
        .with(file_layer.with_filter(subscriber::crate_filter(LevelFilter::DEBUG)));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (path, tmp, guard)
}
