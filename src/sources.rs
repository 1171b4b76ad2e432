//! Source tree enumeration and classification.
//!
//! Every regular file (or symlink to one) below the source directory is a
//! dotfile. Files whose name ends in the template extension are rendered;
//! everything else is symlinked.
use globset::GlobSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::error::{InstallerError, ScanError};

/// How a source file is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Rendered through the template engine and written as a file.
    Template,
    /// Symlinked into place.
    Plain,
}

/// A file found under the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source directory, e.g. `config/git/config`.
    pub relative: PathBuf,
    /// Absolute path of the file.
    pub source: PathBuf,
    /// Template or plain.
    pub kind: SourceKind,
}

impl SourceFile {
    /// Classify `relative` (found at `source`) using `template_extension`.
    #[must_use]
    pub fn new(relative: PathBuf, source: PathBuf, template_extension: &str) -> Self {
        let kind = if template_stem(&relative, template_extension).is_some() {
            SourceKind::Template
        } else {
            SourceKind::Plain
        };
        Self {
            relative,
            source,
            kind,
        }
    }

    /// Where this file installs to under `home`.
    ///
    /// `vimrc` becomes `home/.vimrc`, `config/git/config` becomes
    /// `home/.config/git/config`, and a template `gitconfig.hbs` becomes
    /// `home/.gitconfig`.
    #[must_use]
    pub fn target(&self, home: &Path, template_extension: &str) -> PathBuf {
        let relative = match self.kind {
            SourceKind::Template => template_stem(&self.relative, template_extension)
                .unwrap_or_else(|| self.relative.clone()),
            SourceKind::Plain => self.relative.clone(),
        };
        let mut dotted = std::ffi::OsString::from(".");
        dotted.push(relative.as_os_str());
        home.join(dotted)
    }
}

/// Strip `.<ext>` from the final component of `relative`, if present and
/// something is left.
fn template_stem(relative: &Path, ext: &str) -> Option<PathBuf> {
    let name = relative.file_name()?.to_str()?;
    let stem = name.strip_suffix(ext)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(relative.with_file_name(stem))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Whether the entry's path relative to `source_dir` matches an ignore
/// pattern. A matching directory is pruned along with its contents.
fn is_ignored(entry: &DirEntry, source_dir: &Path, ignore: &GlobSet) -> bool {
    entry
        .path()
        .strip_prefix(source_dir)
        .is_ok_and(|relative| ignore.is_match(relative))
}

/// Enumerate the dotfiles under the configured source directory.
///
/// Entries are returned in file-name order. Hidden entries and entries
/// matching an ignore pattern are skipped, together with everything below
/// them when they are directories. Directories themselves, including
/// symlinks to directories, are never returned.
///
/// # Errors
///
/// Returns an error if the source directory is missing, an entry cannot be
/// read, or the ignore patterns do not compile.
pub fn scan(config: &Config) -> Result<Vec<SourceFile>, InstallerError> {
    let source_dir = config.source_dir();
    let ignore = config.ignore_set()?;
    Ok(scan_dir(&source_dir, &ignore, &config.template_extension)?)
}

/// Enumerate files under `source_dir`; see [`scan`].
///
/// # Errors
///
/// Returns an error if `source_dir` does not exist or an entry cannot be read.
pub fn scan_dir(
    source_dir: &Path,
    ignore: &GlobSet,
    template_extension: &str,
) -> Result<Vec<SourceFile>, ScanError> {
    if !source_dir.is_dir() {
        return Err(ScanError::MissingSourceDir(source_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_ignored(e, source_dir, ignore));

    for entry in walker {
        let entry = entry.map_err(|source| ScanError::Walk {
            path: source
                .path()
                .map_or_else(|| source_dir.to_path_buf(), Path::to_path_buf),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(source_dir) else {
            continue;
        };
        files.push(SourceFile::new(
            relative.to_path_buf(),
            path.to_path_buf(),
            template_extension,
        ));
    }
    Ok(files)
}
