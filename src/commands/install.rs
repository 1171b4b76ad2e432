//! The install command: plan, report and apply.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::Config;
use crate::logging::{FileStatus, Log, Logger, Palette};
use crate::plan::{Action, Plan, PlannedFile, display_path};
use crate::render::{self, TemplateRenderer};
use crate::sources;

/// How the planned files are reported and applied.
#[derive(Debug, Clone, Copy)]
pub struct ApplyOpts {
    /// Report only; write nothing.
    pub dry_run: bool,
    /// Show skipped files and per-file detail on the console.
    pub verbose: bool,
    /// Palette for report lines.
    pub palette: Palette,
}

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the root or home directory cannot be resolved, the
/// configuration is invalid, the source tree cannot be read, a template fails
/// to render, or any file could not be installed.
pub fn run(cli: &Cli, log: &Logger) -> Result<()> {
    let root = resolve_root(cli)?;
    let home = resolve_home(cli)?;
    log.debug(&format!("root: {}", root.display()));
    log.debug(&format!("home: {}", home.display()));

    let config = Config::load(&root)?;
    let files = sources::scan(&config)?;
    log.debug(&format!(
        "{} file(s) under {}",
        files.len(),
        config.source_dir().display()
    ));

    for name in render::shadowed_variables(&config) {
        log.warn(&format!(
            "variable `{name}` in dotfiles.toml is hidden by the built-in of the same name"
        ));
    }

    let renderer = TemplateRenderer::new(&config, &home, cli.github_token.as_deref());
    let plan = Plan::build(
        files,
        &home,
        &config.template_extension,
        &renderer,
        cli.force(),
    )?;
    log.debug(&format!("{} file(s) to update", plan.pending()));

    let opts = ApplyOpts {
        dry_run: cli.dry_run,
        verbose: cli.verbose,
        palette: log.palette(),
    };
    apply_plan(&plan, &home, &opts, log);

    log.print_summary(cli.dry_run, cli.verbose);

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} file(s) failed");
    }
    Ok(())
}

/// Report every planned file and, unless dry-running, apply it.
///
/// A failure to apply one file is logged and recorded; the remaining files
/// are still processed.
pub fn apply_plan(plan: &Plan, home: &Path, opts: &ApplyOpts, log: &dyn Log) {
    if opts.dry_run {
        log.info("Here's what the output will look like on a 'real' run.");
        log.info(&opts.palette.emphasis("Nothing is being written to the filesystem."));
        log.info("");
    }

    let width = plan.width();
    for file in &plan.files {
        apply_single(file, width, home, opts, log);
    }
}

fn apply_single(
    file: &PlannedFile,
    width: usize,
    home: &Path,
    opts: &ApplyOpts,
    log: &dyn Log,
) {
    let line = file.report_line(width, home, opts.palette);
    let target = display_path(&file.target, home);

    if file.action == Action::Skip {
        if opts.verbose {
            log.info(&line);
        } else {
            log.debug(&line);
        }
        log.record_file(&target, FileStatus::Skipped, file.reason.as_deref());
        return;
    }

    log.info(&line);
    if opts.verbose {
        log.info(&file.detail(opts.palette));
    }

    if opts.dry_run {
        log.dry_run(&format!("would {} {target}", file.action.label()));
        log.record_file(&target, FileStatus::Updated, None);
        return;
    }

    let resource = file.resource();
    match resource.apply() {
        Ok(()) => {
            log.debug(&format!("applied {}", resource.description()));
            log.record_file(&target, FileStatus::Updated, None);
        }
        Err(e) => {
            let msg = format!("{e:#}");
            log.error(&format!("{target}: {msg}"));
            log.record_file(&target, FileStatus::Failed, Some(&msg));
        }
    }
}

/// Resolve the dotfiles root: `--root`, then `$DOTFILES_ROOT`, then the
/// current directory.
///
/// # Errors
///
/// Returns an error if the chosen directory does not exist.
pub fn resolve_root(cli: &Cli) -> Result<PathBuf> {
    let env_root = std::env::var_os("DOTFILES_ROOT").map(PathBuf::from);
    let root = match choose_root(cli.root.as_deref(), env_root) {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine current directory")?,
    };
    dunce::canonicalize(&root).with_context(|| {
        format!(
            "cannot resolve dotfiles root {}. Use --root or set DOTFILES_ROOT env var",
            root.display()
        )
    })
}

fn choose_root(explicit: Option<&Path>, env_root: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_root.filter(|p| !p.as_os_str().is_empty()))
}

/// Resolve the home directory: `--home`, then `$HOME` (or `%USERPROFILE%`
/// on Windows).
///
/// # Errors
///
/// Returns an error if no home directory is given or set.
pub fn resolve_home(cli: &Cli) -> Result<PathBuf> {
    let home = match &cli.home {
        Some(home) => home.clone(),
        None => home_from_env()
            .context("cannot determine home directory. Use --home or set HOME")?,
    };
    std::path::absolute(&home)
        .with_context(|| format!("cannot resolve home directory {}", home.display()))
}

fn home_from_env() -> Option<PathBuf> {
    let var = std::env::var_os("HOME").filter(|v| !v.is_empty());
    #[cfg(windows)]
    let var = var.or_else(|| std::env::var_os("USERPROFILE").filter(|v| !v.is_empty()));
    var.map(PathBuf::from)
}
