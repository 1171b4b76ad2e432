//! Tracing subscriber setup: console formatter, file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use super::DRY_RUN_TARGET;
use super::utils::{format_utc_datetime, format_utc_time, log_file_path, strip_ansi};

/// Environment variable that overrides the console log filter.
const LOG_ENV: &str = "DOTFILES_INSTALLER_LOG";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::Layer`] that appends all events to the persistent
/// log file with timestamps and ANSI codes stripped.
///
/// Always captures events at `DEBUG` and above regardless of the console
/// verbosity.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Open the log file for `command` in the cache directory.
    ///
    /// Returns `None` if the cache directory or the file is unavailable.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?)
    }

    /// Truncate `path`, write a run header, and return a layer appending to it.
    pub(super) fn at(path: &Path) -> Option<Self> {
        let version = option_env!("DOTFILES_INSTALLER_VERSION")
            .unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             dotfiles-installer {version} {}\n\
             ==========================================\n",
            format_utc_datetime(),
        );
        fs::write(path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = strip_ansi(&extractor.message);
        let ts = format_utc_time();

        let line = match (level, target) {
            (_, DRY_RUN_TARGET) => format!("[{ts}]     [dry run] {msg}"),
            (tracing::Level::ERROR, _) => format!("[{ts}]     [error] {msg}"),
            (tracing::Level::WARN, _) => format!("[{ts}]     [warn] {msg}"),
            (tracing::Level::DEBUG, _) => format!("[{ts}]     [debug] {msg}"),
            _ => format!("[{ts}]     {msg}"),
        };

        if let Ok(mut f) = self.file.lock() {
            writeln!(f, "{line}").ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits installer-style
/// console output.
struct InstallerFormatter {
    color: bool,
}

impl InstallerFormatter {
    fn line(level: tracing::Level, target: &str, msg: &str) -> String {
        match level {
            tracing::Level::ERROR => format!("\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            _ if target == DRY_RUN_TARGET => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            tracing::Level::INFO if msg.is_empty() => String::new(),
            tracing::Level::INFO => format!("  {msg}"),
            _ => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for InstallerFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);

        let line = Self::line(*metadata.level(), metadata.target(), &extractor.message);
        if self.color {
            writeln!(writer, "{line}")
        } else {
            writeln!(writer, "{}", strip_ansi(&line))
        }
    }
}

/// Filter passing this crate's events at `level` and everything else only
/// at `warn` and above.
///
/// Dependencies log through the `log` facade, and without this their
/// internal debug output would show up under `--verbose`.
pub(super) fn crate_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::new(format!(
        "warn,{}={}",
        env!("CARGO_CRATE_NAME"),
        level.to_string().to_lowercase()
    ))
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console output goes to stdout (`info` and below) and stderr (`warn` and
/// above); `debug` reaches the console only when `verbose` is set, unless
/// `DOTFILES_INSTALLER_LOG` overrides the filter. Every event is also
/// written to `$XDG_CACHE_HOME/dotfiles-installer/<command>.log`.
///
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, color: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| crate_filter(default_level));

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(InstallerFormatter { color })
        .with_writer(make_writer)
        .with_filter(console_filter);

    let file_layer =
        FileLayer::new(command).map(|l| l.with_filter(crate_filter(LevelFilter::DEBUG)));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
