//! Dotfiles installer.
//!
//! Walks a source tree of dotfiles and installs each file into the home
//! directory, either as a symlink back into the repository or, for
//! templates, as a rendered copy. Existing targets are left alone unless
//! forced.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: load and validate `dotfiles.toml`
//! - **[`sources`]**: enumerate and classify source files
//! - **[`render`]**: Handlebars template rendering
//! - **[`resources`]**: idempotent `check + apply` primitives (symlinks, rendered files)
//! - **[`plan`]**: per-file install/overwrite/skip decisions
//! - **[`commands`]**: top-level orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod render;
pub mod resources;
pub mod sources;
