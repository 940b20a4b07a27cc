//! Version-control collaborator traits
//!
//! The workflow only talks to version control through these traits.
//! `tagship-git` provides the git implementation.

use crate::error::Result;
use crate::types::RepositoryState;

/// Read-only view of the local repository.
///
/// Every call reads live state; implementations must not cache.
pub trait RepositoryInspector {
    /// Current branch name, `None` when HEAD is detached or unborn
    fn current_branch(&self) -> Result<Option<String>>;

    /// No staged or unstaged modifications and no untracked files
    fn is_clean(&self) -> Result<bool>;

    /// Paths that make the working tree dirty
    fn dirty_paths(&self) -> Result<Vec<String>>;

    /// Full hash of the HEAD commit
    fn head_commit_hash(&self) -> Result<String>;

    /// Snapshot of the repository state
    fn repository_state(&self) -> Result<RepositoryState>;
}

/// Mutating version-control operations used by the release workflow
pub trait VersionControl: RepositoryInspector {
    /// Create a branch at HEAD; fails if it already exists
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Create an annotated tag at HEAD
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}
