//! Command-line interface.
use clap::Parser;
use std::path::PathBuf;

use crate::plan::ForceMode;

/// Command-line entry point for the dotfiles installer.
///
/// `-V` is taken by `--verbose`, so clap's generated version flag is
/// replaced by a long-only `--version`.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dotfiles-install",
    about = "Symlink and template dotfiles into the home directory",
    disable_version_flag = true,
    after_help = "Exits 1 when any file fails to install and 2 on unrecognised arguments."
)]
pub struct Cli {
    /// Don't actually copy or write any files
    #[arg(short = 'n', long = "noop", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Re-render templates whose target exists with different content
    #[arg(short = 'f', long, overrides_with = "force_all")]
    pub force_templates: bool,

    /// Overwrite every target file whether it already exists or not
    #[arg(short = 'F', long, overrides_with = "force_templates")]
    pub force_all: bool,

    /// GitHub API token exposed to templates as `github_token`
    #[arg(
        long,
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub github_token: Option<String>,

    /// Show skipped files, link commands and rendered templates
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Dotfiles repository root (defaults to $DOTFILES_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Install into DIR instead of $HOME
    #[arg(long, value_name = "DIR")]
    pub home: Option<PathBuf>,

    /// Print version information
    #[arg(long)]
    pub version: bool,
}

impl Cli {
    /// Collapse the two force flags into a single mode.
    ///
    /// The flags override each other, so at most one is set.
    #[must_use]
    pub const fn force(&self) -> ForceMode {
        if self.force_all {
            ForceMode::All
        } else if self.force_templates {
            ForceMode::Templates
        } else {
            ForceMode::None
        }
    }
}
