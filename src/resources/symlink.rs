//! Symlink resource.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::helpers::fs::{ensure_parent_dir, remove_existing};
use super::{Applicable, Resource, ResourceState};

/// A symlink from a home-directory target to a file in the source tree.
#[derive(Debug, Clone)]
pub struct SymlinkResource {
    /// The source file (what the symlink points to).
    pub source: PathBuf,
    /// The target path (where the symlink is created).
    pub target: PathBuf,
}

impl SymlinkResource {
    /// Create a new symlink resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// The equivalent shell command, with arguments containing spaces quoted.
    #[must_use]
    pub fn command(&self) -> String {
        [
            "ln".to_string(),
            "-s".to_string(),
            shell_quote(&self.source),
            shell_quote(&self.target),
        ]
        .join(" ")
    }
}

fn shell_quote(path: &Path) -> String {
    let s = path.to_string_lossy();
    if s.contains(' ') {
        format!("{s:?}")
    } else {
        s.into_owned()
    }
}

impl Applicable for SymlinkResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<()> {
        ensure_parent_dir(&self.target)?;
        remove_existing(&self.target)?;
        create_symlink(&self.source, &self.target)
            .with_context(|| format!("create link: {}", self.target.display()))?;
        Ok(())
    }
}

impl Resource for SymlinkResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source.exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        // Existence follows symlinks: a dangling link counts as missing.
        if !self.target.exists() {
            return Ok(ResourceState::Missing);
        }

        std::fs::read_link(&self.target).map_or_else(
            |_| {
                let current = if self.target.is_dir() {
                    "target is a directory"
                } else {
                    "target is a regular file"
                };
                Ok(ResourceState::Incorrect {
                    current: current.to_string(),
                })
            },
            |existing| {
                if paths_equal(&existing, &self.source) {
                    Ok(ResourceState::Correct)
                } else {
                    Ok(ResourceState::Incorrect {
                        current: format!("points to {}", existing.display()),
                    })
                }
            },
        )
    }
}

/// Compare two paths for equality, handling UNC prefix normalization on Windows.
fn paths_equal(a: &Path, b: &Path) -> bool {
    let normalize = |p: &Path| -> PathBuf {
        #[cfg(windows)]
        {
            let s = p.to_string_lossy();
            if let Some(stripped) = s.strip_prefix(r"\\?\") {
                return PathBuf::from(stripped);
            }
        }
        p.to_path_buf()
    };

    normalize(a) == normalize(b)
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        let result = if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {} (requires developer mode or admin)",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}
