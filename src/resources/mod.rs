//! Idempotent resource primitives (check + apply pattern).
pub mod helpers;
pub mod symlink;
pub mod template;

use anyhow::Result;

pub use symlink::SymlinkResource;
pub use template::TemplateResource;

/// Minimal interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// This method should:
    /// - Create parent directories if needed
    /// - Replace whatever currently occupies the target
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or invalid paths.
    fn apply(&self) -> Result<()>;
}

/// State of an installed dotfile.
///
/// # Examples
///
/// ```
/// use dotfiles_installer::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let wrong = ResourceState::Incorrect { current: "points to /other/path".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(correct, wrong);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing resolvable exists at the target.
    Missing,
    /// The target already matches the desired state.
    Correct,
    /// Something else exists at the target.
    Incorrect {
        /// Description of what is there now.
        current: String,
    },
    /// The resource cannot be applied at all (e.g. its source vanished).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Unified interface for resources that can be checked and applied.
///
/// The state is inspected while planning; whether to apply is decided by
/// [`plan::decide`](crate::plan::decide), not by the resource.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;
}
