//! `dotfiles-install` binary.
use anyhow::Result;
use clap::Parser;

use dotfiles_installer::cli::Cli;
use dotfiles_installer::commands;
use dotfiles_installer::logging::{self, Logger, Palette};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    if args.version {
        print_version();
        return Ok(());
    }

    let palette = Palette::detect();
    logging::init_subscriber(args.verbose, palette.is_color(), "install");
    let log = Logger::new("install", palette);

    commands::install::run(&args, &log)
}

#[allow(clippy::print_stdout)]
fn print_version() {
    let version = option_env!("DOTFILES_INSTALLER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    println!("dotfiles-install {version}");
}
