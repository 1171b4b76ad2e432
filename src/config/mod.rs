//! Repository configuration (`dotfiles.toml`).
pub mod toml_loader;

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Name of the optional configuration file at the repository root.
pub const CONFIG_FILE: &str = "dotfiles.toml";

/// Installer configuration loaded from [`CONFIG_FILE`].
///
/// Every field is optional in the file; a repository without a config file
/// installs from `src/` and treats `*.hbs` files as templates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Repository root the config was loaded from.
    #[serde(skip)]
    pub root: PathBuf,
    /// Source directory, relative to the root.
    pub source: PathBuf,
    /// File-name suffix (without the dot) that marks a template.
    pub template_extension: String,
    /// Glob patterns, matched against paths relative to the source directory,
    /// whose files are never installed.
    pub ignore: Vec<String>,
    /// Extra values exposed to templates.
    pub variables: BTreeMap<String, toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            source: PathBuf::from("src"),
            template_extension: "hbs".to_string(),
            ignore: Vec::new(),
            variables: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the configuration for the repository at `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or
    /// parsed, or if it fails validation.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml_loader::load_config(&root.join(CONFIG_FILE))?;
        config.root = root.to_path_buf();
        config.validate()?;
        Ok(config)
    }

    /// Absolute path of the source directory.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(&self.source)
    }

    /// Compile the ignore patterns.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that is not a valid glob.
    pub fn ignore_set(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::InvalidPattern {
            pattern: self.ignore.join(", "),
            source,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ext = &self.template_extension;
        if ext.is_empty() || ext.contains(['/', '\\']) {
            return Err(ConfigError::InvalidExtension(ext.clone()));
        }
        self.ignore_set()?;
        Ok(())
    }
}
