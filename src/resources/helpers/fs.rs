//! File-system resource helpers.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever exists at `path`: a file, a symlink (broken or not), or a
/// whole directory tree. Symlinks are removed, never followed.
///
/// Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove directory: {}", path.display()))?;
    } else {
        remove_file_or_link(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}

/// Remove a file or symlink.
///
/// On Windows a symlink to a directory must be removed with `remove_dir`;
/// `symlink_metadata().is_dir()` is `false` for those, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit is checked instead.
fn remove_file_or_link(path: &Path) -> std::io::Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        let meta = std::fs::symlink_metadata(path)?;
        if meta.file_attributes() & 0x10 != 0 {
            return std::fs::remove_dir(path);
        }
    }
    std::fs::remove_file(path)
}
