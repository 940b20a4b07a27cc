//! Branch operations

use git2::BranchType;
use tracing::{info, instrument};

use tagship_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Check if a local branch exists
    pub fn has_branch(&self, name: &str) -> Result<bool> {
        match self.repo.find_branch(name, BranchType::Local) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Create a local branch at HEAD without switching to it
    #[instrument(skip(self), fields(name))]
    pub fn create_branch(&self, name: &str) -> Result<()> {
        if !git2::Branch::name_is_valid(name)? {
            return Err(GitError::BranchCreationFailed {
                name: name.to_string(),
                reason: "invalid branch name".to_string(),
            });
        }

        if self.has_branch(name)? {
            return Err(GitError::BranchExists(name.to_string()));
        }

        let head = self.head_commit()?;
        self.repo
            .branch(name, &head, false)
            .map_err(|e| GitError::BranchCreationFailed {
                name: name.to_string(),
                reason: e.message().to_string(),
            })?;

        info!(name, commit = %head.id(), "created branch");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_repo;

    #[test]
    fn test_create_branch() {
        let (_temp, repo) = setup_repo();
        repo.create_branch("releases/1.2.3").unwrap();
        assert!(repo.has_branch("releases/1.2.3").unwrap());

        // HEAD stays on the current branch
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("master"));
    }

    #[test]
    fn test_branch_points_at_head() {
        let (_temp, repo) = setup_repo();
        repo.create_branch("releases/1.0.0").unwrap();
        let branch = repo
            .repo
            .find_branch("releases/1.0.0", BranchType::Local)
            .unwrap();
        let target = branch.get().peel_to_commit().unwrap().id();
        assert_eq!(target, repo.head_commit().unwrap().id());
    }

    #[test]
    fn test_branch_already_exists() {
        let (_temp, repo) = setup_repo();
        repo.create_branch("releases/1.0.0").unwrap();
        let result = repo.create_branch("releases/1.0.0");
        assert!(matches!(result, Err(GitError::BranchExists(_))));
    }

    #[test]
    fn test_invalid_branch_name() {
        let (_temp, repo) = setup_repo();
        let result = repo.create_branch("releases/1..0");
        assert!(matches!(result, Err(GitError::BranchCreationFailed { .. })));
    }
}
