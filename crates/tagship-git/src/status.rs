//! Repository status operations

use git2::{Status, StatusOptions};
use tagship_core::types::RepositoryState;
use tracing::debug;

use crate::repository::{GitRepo, Result};

const INDEX_CHANGES: Status = Status::INDEX_NEW
    .union(Status::INDEX_MODIFIED)
    .union(Status::INDEX_DELETED)
    .union(Status::INDEX_RENAMED)
    .union(Status::INDEX_TYPECHANGE);

const WORKTREE_CHANGES: Status = Status::WT_MODIFIED
    .union(Status::WT_DELETED)
    .union(Status::WT_RENAMED)
    .union(Status::WT_TYPECHANGE);

/// Unmerged paths carry only this flag
const CONFLICTS: Status = Status::CONFLICTED;

impl GitRepo {
    /// Status entries for tracked changes and untracked files, ignored files excluded
    fn status_entries(&self) -> Result<Vec<(String, Status)>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let entries = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .map(|entry| {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                (path, entry.status())
            })
            .collect();

        Ok(entries)
    }

    /// Check if the working directory is clean: no staged or unstaged
    /// modifications and no untracked files
    pub fn is_clean(&self) -> Result<bool> {
        Ok(self.dirty_paths()?.is_empty())
    }

    /// Paths with staged, unstaged, conflicted or untracked changes
    pub fn dirty_paths(&self) -> Result<Vec<String>> {
        Ok(self
            .status_entries()?
            .into_iter()
            .filter(|(_, status)| {
                status.intersects(INDEX_CHANGES | WORKTREE_CHANGES | CONFLICTS) || status.is_wt_new()
            })
            .map(|(path, _)| path)
            .collect())
    }

    /// Get the current branch name
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // Detached HEAD
            Ok(None)
        }
    }

    /// Get list of modified files (staged, unstaged or conflicted)
    pub fn modified_files(&self) -> Result<Vec<String>> {
        Ok(self
            .status_entries()?
            .into_iter()
            .filter(|(_, status)| status.intersects(INDEX_CHANGES | WORKTREE_CHANGES | CONFLICTS))
            .map(|(path, _)| path)
            .collect())
    }

    /// Get list of untracked files
    pub fn untracked_files(&self) -> Result<Vec<String>> {
        Ok(self
            .status_entries()?
            .into_iter()
            .filter(|(_, status)| status.is_wt_new())
            .map(|(path, _)| path)
            .collect())
    }

    /// Read the full repository state
    pub fn state(&self) -> Result<RepositoryState> {
        let head_commit_hash = match self.head_commit_hash() {
            Ok(hash) => Some(hash),
            Err(tagship_core::error::GitError::NoCommits) => None,
            Err(e) => return Err(e),
        };

        let state = RepositoryState {
            current_branch: self.current_branch()?,
            has_uncommitted_changes: !self.modified_files()?.is_empty(),
            has_untracked_files: !self.untracked_files()?.is_empty(),
            head_commit_hash,
        };
        debug!(?state, "read repository state");
        Ok(state)
    }
}
