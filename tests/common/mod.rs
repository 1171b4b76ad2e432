// Shared helpers for integration tests.
//
// Provides a temporary dotfiles repository and a temporary home directory,
// plus a fluent builder so each test can lay out its source tree without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser as _;
use dotfiles_installer::cli::Cli;
use dotfiles_installer::config::CONFIG_FILE;
use dotfiles_installer::logging::{Logger, Palette};

/// An isolated repository and home directory, both backed by
/// [`tempfile::TempDir`] and deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory containing the dotfiles repository.
    pub root: tempfile::TempDir,
    /// Temporary directory standing in for `$HOME`.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a repository with an empty `src/` directory.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create repo dir");
        let home = tempfile::tempdir().expect("create home dir");
        std::fs::create_dir_all(root.path().join("src")).expect("create src dir");
        Self { root, home }
    }

    /// Path to the repository root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Path to the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Absolute path of `relative` inside the source directory.
    pub fn source(&self, relative: &str) -> PathBuf {
        self.root.path().join("src").join(relative)
    }

    /// Absolute path of `relative` inside the home directory.
    pub fn target(&self, relative: &str) -> PathBuf {
        self.home.path().join(relative)
    }

    /// Parse `extra` flags with `--root` and `--home` pointing at this context.
    pub fn cli(&self, extra: &[&str]) -> Cli {
        let mut args = vec![
            "dotfiles-install".to_string(),
            "--root".to_string(),
            self.root_path().display().to_string(),
            "--home".to_string(),
            self.home_path().display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));
        Cli::try_parse_from(args).expect("parse cli")
    }

    /// Run the install command with `extra` flags and return the logger so
    /// tests can inspect the recorded outcomes.
    pub fn install(&self, extra: &[&str]) -> (anyhow::Result<()>, Logger) {
        let cli = self.cli(extra);
        let log = Logger::without_file(Palette::plain());
        let result = dotfiles_installer::commands::install::run(&cli, &log);
        (result, log)
    }

    /// Write `content` to `relative` in the home directory.
    pub fn write_target(&self, relative: &str, content: &str) {
        let path = self.target(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create target parent");
        }
        std::fs::write(path, content).expect("write target file");
    }

    /// Read a target file as a string.
    pub fn read_target(&self, relative: &str) -> String {
        std::fs::read_to_string(self.target(relative)).expect("read target file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `src/<relative>`, creating parent directories.
    pub fn with_source_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.source(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create source parent");
        }
        std::fs::write(&path, content).expect("write source file");
        self
    }

    /// Write `content` to `dotfiles.toml` at the repository root.
    pub fn with_config(self, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join(CONFIG_FILE), content).expect("write config");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
