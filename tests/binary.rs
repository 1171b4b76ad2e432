#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Tests that drive the compiled `dotfiles-install` binary.

mod common;

use std::path::Path;
use std::process::{Command, Output};

use common::{IntegrationTestContext, TestContextBuilder};

fn command(args: &[&str], cache: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dotfiles-install"));
    cmd.args(args)
        .env("XDG_CACHE_HOME", cache)
        .env("NO_COLOR", "1")
        .env_remove("DOTFILES_INSTALLER_LOG")
        .env_remove("GITHUB_TOKEN");
    cmd
}

fn run(args: &[&str], cache: &Path) -> Output {
    command(args, cache).output().expect("spawn dotfiles-install")
}

fn ctx_args(ctx: &IntegrationTestContext, extra: &[&str]) -> Vec<String> {
    let mut args = vec![
        "--root".to_string(),
        ctx.root_path().display().to_string(),
        "--home".to_string(),
        ctx.home_path().display().to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));
    args
}

fn as_strs(args: &[String]) -> Vec<&str> {
    args.iter().map(String::as_str).collect()
}

#[test]
fn version_flag_prints_version() {
    let cache = tempfile::tempdir().unwrap();
    let out = run(&["--version"], cache.path());
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).starts_with("dotfiles-install "));
}

#[test]
fn unknown_arguments_are_a_usage_error() {
    let cache = tempfile::tempdir().unwrap();
    let out = run(&["stray"], cache.path());
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn dry_run_prints_preamble_and_plan() {
    let ctx = TestContextBuilder::new()
        .with_source_file("vimrc", "x")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let root = ctx.root_path().display().to_string();
    let home = ctx.home_path().display().to_string();

    let out = run(
        &["--dry-run", "--root", &root, "--home", &home],
        cache.path(),
    );

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Here's what the output will look like on a 'real' run."));
    assert!(stdout.contains("Nothing is being written to the filesystem."));
    assert!(stdout.contains("install ~/.vimrc"));
    assert!(!stdout.contains("would install"));
    assert!(!stdout.contains('\x1b'), "NO_COLOR output carries escape codes");
    assert!(ctx.target(".vimrc").symlink_metadata().is_err());
    assert!(
        cache
            .path()
            .join("dotfiles-installer")
            .join("install.log")
            .exists()
    );
}

#[test]
fn failures_exit_non_zero() {
    let ctx = TestContextBuilder::new()
        .with_config("source = \"missing\"\n")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let root = ctx.root_path().display().to_string();
    let home = ctx.home_path().display().to_string();

    let out = run(&["--root", &root, "--home", &home], cache.path());

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Source directory not found"));
}

#[test]
fn verbose_dry_run_tags_preview_lines() {
    let ctx = TestContextBuilder::new()
        .with_source_file("vimrc", "x")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &["-n", "-V"]);

    let out = run(&as_strs(&args), cache.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("ln -s "));
    assert!(stdout.contains("[DRY RUN] would install ~/.vimrc"));
}

#[test]
fn verbose_output_leaves_out_dependency_internals() {
    let ctx = TestContextBuilder::new()
        .with_config("ignore = [\"*.swp\"]\n")
        .with_source_file("gitconfig.hbs", "home={{home}}")
        .with_source_file("vimrc", "x")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &["-V"]);

    let out = run(&as_strs(&args), cache.path());

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("ln -s "));
    assert!(stdout.contains("home="));
    assert!(!stdout.contains("built glob set"), "{stdout}");
    assert!(!stdout.contains("Rendering value"), "{stdout}");

    let logged = std::fs::read_to_string(
        cache.path().join("dotfiles-installer").join("install.log"),
    )
    .unwrap();
    assert!(logged.contains("applied "));
    assert!(!logged.contains("built glob set"));
    assert!(!logged.contains("Rendering value"));
}

#[test]
fn github_token_falls_back_to_environment() {
    let ctx = TestContextBuilder::new()
        .with_source_file("gitconfig.hbs", "token={{github_token}}")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &[]);

    let out = command(&as_strs(&args), cache.path())
        .env("GITHUB_TOKEN", "from-env")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(ctx.read_target(".gitconfig"), "token=from-env");
}

#[test]
fn github_token_flag_beats_environment() {
    let ctx = TestContextBuilder::new()
        .with_source_file("gitconfig.hbs", "token={{github_token}}")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &["--github-token", "from-flag"]);

    let out = command(&as_strs(&args), cache.path())
        .env("GITHUB_TOKEN", "from-env")
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(ctx.read_target(".gitconfig"), "token=from-flag");
}

#[test]
fn hidden_config_variables_warn_on_stderr() {
    let ctx = TestContextBuilder::new()
        .with_config("[variables]\nhome = \"/elsewhere\"\n")
        .with_source_file("profile.hbs", "HOME={{home}}")
        .build();
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &[]);

    let out = run(&as_strs(&args), cache.path());

    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("WARN"), "{stderr}");
    assert!(stderr.contains("variable `home`"), "{stderr}");
    assert_eq!(
        ctx.read_target(".profile"),
        format!("HOME={}", ctx.home_path().display())
    );
}

#[cfg(unix)]
#[test]
fn failed_files_are_listed_in_the_summary() {
    let ctx = TestContextBuilder::new()
        .with_source_file("config/app/settings", "x")
        .build();
    ctx.write_target(".config", "not a directory");
    let cache = tempfile::tempdir().unwrap();
    let args = ctx_args(&ctx, &[]);

    let out = run(&as_strs(&args), cache.path());

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 of 1 file(s) could not be updated."));
    assert!(stdout.contains("~/.config/app/settings: "));
    assert!(String::from_utf8_lossy(&out.stderr).contains("1 file(s) failed"));
}
