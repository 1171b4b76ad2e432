//! Per-file install decisions.
//!
//! A [`Plan`] is built once, before anything is written: every template is
//! rendered and every target inspected up front, so a broken template aborts
//! the run with the home directory untouched.
use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::logging::Palette;
use crate::render::TemplateRenderer;
use crate::resources::{Resource, ResourceState, SymlinkResource, TemplateResource};
use crate::sources::{SourceFile, SourceKind};

/// Which existing targets may be replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForceMode {
    /// Only missing targets are installed.
    #[default]
    None,
    /// Templates whose rendered content differs from the target are rewritten.
    Templates,
    /// Every existing target is overwritten.
    All,
}

/// What happens to one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing is at the target yet.
    Install,
    /// The target exists and is replaced.
    Overwrite,
    /// The target exists and is left alone.
    Skip,
}

impl Action {
    /// Status word shown in the report.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
        }
    }
}

/// Decide the action for a file of `kind` whose target is in `state`.
///
/// Returns the reason shown for skipped files alongside the action.
#[must_use]
pub fn decide(
    kind: SourceKind,
    state: &ResourceState,
    force: ForceMode,
) -> (Action, Option<String>) {
    let (overwrite, reason) = match (kind, state) {
        (_, ResourceState::Missing) => return (Action::Install, None),
        (_, ResourceState::Invalid { reason }) => return (Action::Skip, Some(reason.clone())),
        (SourceKind::Plain, ResourceState::Correct) => (force == ForceMode::All, "already linked"),
        (SourceKind::Plain, ResourceState::Incorrect { .. }) => {
            (force == ForceMode::All, "already exists")
        }
        (SourceKind::Template, ResourceState::Correct) => (force == ForceMode::All, "same content"),
        (SourceKind::Template, ResourceState::Incorrect { .. }) => {
            (force != ForceMode::None, "content differs")
        }
    };
    if overwrite {
        (Action::Overwrite, None)
    } else {
        (Action::Skip, Some(reason.to_string()))
    }
}

/// One source file with its target and decided action.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// The source file.
    pub file: SourceFile,
    /// Absolute target path.
    pub target: PathBuf,
    /// Decided action.
    pub action: Action,
    /// Why the file is skipped.
    pub reason: Option<String>,
    /// Rendered content, for templates.
    pub content: Option<String>,
}

impl PlannedFile {
    /// The resource that installs this file.
    #[must_use]
    pub fn resource(&self) -> Box<dyn Resource> {
        match &self.content {
            Some(content) => Box::new(TemplateResource::new(
                self.file.source.clone(),
                self.target.clone(),
                content.clone(),
            )),
            None => Box::new(SymlinkResource::new(
                self.file.source.clone(),
                self.target.clone(),
            )),
        }
    }

    /// Report line: status right-aligned to `width`, then the target.
    ///
    /// Skipped files also show their reason.
    #[must_use]
    pub fn report_line(&self, width: usize, home: &Path, palette: Palette) -> String {
        let status = format!("{:>width$}", self.action.label());
        let target = display_path(&self.target, home);
        match self.action {
            Action::Skip => {
                let reason = self.reason.as_deref().unwrap_or("already exists");
                format!(
                    "{} {target}{}",
                    palette.failure(&status),
                    palette.unimportant(&format!(" ({reason})"))
                )
            }
            Action::Install | Action::Overwrite => {
                format!("{} {target}", palette.success(&status))
            }
        }
    }

    /// Verbose detail: the rendered content for templates, the link command
    /// otherwise.
    #[must_use]
    pub fn detail(&self, palette: Palette) -> String {
        let text = self.content.clone().unwrap_or_else(|| {
            SymlinkResource::new(self.file.source.clone(), self.target.clone()).command()
        });
        palette.debugging(&text)
    }
}

/// Every source file with its decided action, in scan order.
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Planned files.
    pub files: Vec<PlannedFile>,
}

impl Plan {
    /// Render templates, inspect targets and decide an action per file.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render or a target cannot be
    /// inspected.
    pub fn build(
        files: Vec<SourceFile>,
        home: &Path,
        template_extension: &str,
        renderer: &TemplateRenderer,
        force: ForceMode,
    ) -> Result<Self> {
        let mut planned = Vec::with_capacity(files.len());
        for file in files {
            let target = file.target(home, template_extension);
            let (state, content) = match file.kind {
                SourceKind::Template => {
                    let content = renderer.render(&file.source)?;
                    let resource =
                        TemplateResource::new(file.source.clone(), target.clone(), content);
                    (resource.current_state()?, Some(resource.content))
                }
                SourceKind::Plain => {
                    let resource = SymlinkResource::new(file.source.clone(), target.clone());
                    (resource.current_state()?, None)
                }
            };
            let (action, reason) = decide(file.kind, &state, force);
            planned.push(PlannedFile {
                file,
                target,
                action,
                reason,
                content,
            });
        }
        Ok(Self { files: planned })
    }

    /// Status column width: the longest label among all files.
    #[must_use]
    pub fn width(&self) -> usize {
        self.files
            .iter()
            .map(|f| f.action.label().len())
            .max()
            .unwrap_or(0)
    }

    /// Number of files that will be installed or overwritten.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.action != Action::Skip)
            .count()
    }
}

/// Display `path` with the home directory abbreviated to `~`.
#[must_use]
pub fn display_path(path: &Path, home: &Path) -> String {
    path.strip_prefix(home).map_or_else(
        |_| path.display().to_string(),
        |rest| Path::new("~").join(rest).display().to_string(),
    )
}
