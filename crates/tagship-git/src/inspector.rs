//! Collaborator trait implementations for [`GitRepo`]

use tagship_core::types::RepositoryState;
use tagship_core::vcs::{RepositoryInspector, VersionControl};
use tagship_core::Result;

use crate::repository::GitRepo;

impl RepositoryInspector for GitRepo {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(GitRepo::current_branch(self)?)
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(GitRepo::is_clean(self)?)
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        Ok(GitRepo::dirty_paths(self)?)
    }

    fn head_commit_hash(&self) -> Result<String> {
        Ok(GitRepo::head_commit_hash(self)?)
    }

    fn repository_state(&self) -> Result<RepositoryState> {
        Ok(self.state()?)
    }
}

impl VersionControl for GitRepo {
    fn create_branch(&self, name: &str) -> Result<()> {
        Ok(GitRepo::create_branch(self, name)?)
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        GitRepo::create_annotated_tag(self, name, message)?;
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        Ok(GitRepo::push_tag(self, remote, tag)?)
    }
}
