//! Rendered-template resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use super::helpers::fs::{ensure_parent_dir, remove_existing};
use super::{Applicable, Resource, ResourceState};

/// A file in the home directory whose content is a rendered template.
#[derive(Debug, Clone)]
pub struct TemplateResource {
    /// The template the content was rendered from.
    pub source: PathBuf,
    /// Where the rendered content is written.
    pub target: PathBuf,
    /// Rendered content.
    pub content: String,
}

impl TemplateResource {
    /// Create a new template resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf, content: String) -> Self {
        Self {
            source,
            target,
            content,
        }
    }
}

impl Applicable for TemplateResource {
    fn description(&self) -> String {
        format!("{} <- {}", self.target.display(), self.source.display())
    }

    fn apply(&self) -> Result<()> {
        ensure_parent_dir(&self.target)?;
        // Writing through a symlink would clobber the file it points to.
        let replace = self
            .target
            .symlink_metadata()
            .is_ok_and(|m| m.is_symlink() || m.is_dir());
        if replace {
            remove_existing(&self.target)?;
        }
        std::fs::write(&self.target, &self.content)
            .with_context(|| format!("write template: {}", self.target.display()))?;
        Ok(())
    }
}

impl Resource for TemplateResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.target.exists() {
            return Ok(ResourceState::Missing);
        }
        if self.target.is_dir() {
            return Ok(ResourceState::Incorrect {
                current: "target is a directory".to_string(),
            });
        }
        let existing = std::fs::read(&self.target)
            .with_context(|| format!("read existing: {}", self.target.display()))?;
        if existing == self.content.as_bytes() {
            Ok(ResourceState::Correct)
        } else {
            Ok(ResourceState::Incorrect {
                current: "content differs".to_string(),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn resource(dir: &tempfile::TempDir, content: &str) -> TemplateResource {
        TemplateResource::new(
            dir.path().join("gitconfig.hbs"),
            dir.path().join("home").join(".gitconfig"),
            content.to_string(),
        )
    }

    #[test]
    fn missing_when_target_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resource(&dir, "x").current_state().unwrap(),
            ResourceState::Missing
        );
    }

    #[test]
    fn correct_when_content_matches() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "[user]\n\tname = me");
        std::fs::create_dir_all(r.target.parent().unwrap()).unwrap();
        std::fs::write(&r.target, "[user]\n\tname = me").unwrap();
        assert_eq!(r.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn incorrect_when_content_differs() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "new");
        std::fs::create_dir_all(r.target.parent().unwrap()).unwrap();
        std::fs::write(&r.target, "new\n").unwrap();
        assert!(matches!(
            r.current_state().unwrap(),
            ResourceState::Incorrect { .. }
        ));
    }

    #[test]
    fn apply_writes_content_and_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "rendered");
        r.apply().unwrap();
        assert_eq!(std::fs::read_to_string(&r.target).unwrap(), "rendered");
        assert_eq!(r.current_state().unwrap(), ResourceState::Correct);
    }

    #[test]
    fn apply_replaces_directory() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "rendered");
        std::fs::create_dir_all(r.target.join("junk")).unwrap();
        r.apply().unwrap();
        assert_eq!(std::fs::read_to_string(&r.target).unwrap(), "rendered");
    }

    #[cfg(unix)]
    #[test]
    fn apply_replaces_symlink_without_touching_its_target() {
        let dir = tempfile::tempdir().unwrap();
        let r = resource(&dir, "rendered");
        let linked = dir.path().join("linked");
        std::fs::write(&linked, "keep me").unwrap();
        std::fs::create_dir_all(r.target.parent().unwrap()).unwrap();
        std::os::unix::fs::symlink(&linked, &r.target).unwrap();

        r.apply().unwrap();
        assert!(!r.target.symlink_metadata().unwrap().is_symlink());
        assert_eq!(std::fs::read_to_string(&r.target).unwrap(), "rendered");
        assert_eq!(std::fs::read_to_string(&linked).unwrap(), "keep me");
    }
}
