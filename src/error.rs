//! Domain-specific error types for the installer.
//!
//! Internal modules return typed errors while the command layer converts
//! them to [`anyhow::Error`] via `?`.
//!
//! # Error hierarchy
//!
//! ```text
//! InstallerError
//! ├── Config(ConfigError)  : dotfiles.toml parsing and validation
//! ├── Scan(ScanError)      : walking the source tree
//! └── Render(RenderError)  : template compilation and rendering
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the installer.
#[derive(Error, Debug)]
pub enum InstallerError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Source tree traversal error.
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Render(#[from] RenderError),
}

/// Errors that arise while loading `dotfiles.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for the expected layout.
    #[error("Invalid TOML in {}: {source}", .path.display())]
    Parse {
        /// Path to the offending file.
        path: PathBuf,
        /// Underlying deserialisation error.
        source: toml::de::Error,
    },

    /// The template extension is empty or contains a path separator.
    #[error("Invalid template extension '{0}'")]
    InvalidExtension(String),

    /// An ignore pattern is not a valid glob.
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern as written in the config.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },
}

/// Errors that arise while enumerating source files.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    MissingSourceDir(PathBuf),

    /// A directory entry could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Walk {
        /// Path being read when the error occurred.
        path: PathBuf,
        /// Underlying walk error.
        source: walkdir::Error,
    },
}

/// Errors that arise while rendering templates.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template file could not be read.
    #[error("Failed to read template {}: {source}", .path.display())]
    Read {
        /// Path to the template.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Handlebars rejected or failed to render the template.
    #[error("Failed to render template {}: {source}", .path.display())]
    Template {
        /// Path to the template.
        path: PathBuf,
        /// Underlying render error.
        source: Box<handlebars::RenderError>,
    },
}
