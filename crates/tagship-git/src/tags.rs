//! Tag operations

use tracing::{info, instrument};

use tagship_core::error::GitError;

use crate::repository::{GitRepo, Result};

/// A tag as seen in the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (annotated tags only)
    pub message: Option<String>,
}

impl GitRepo {
    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let message = reference
                    .peel_to_tag()
                    .ok()
                    .and_then(|t| t.message().map(|m| m.trim_end().to_string()));
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo {
                    name: name.to_string(),
                    commit_hash: target.id().to_string(),
                    message,
                }))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Create an annotated tag on HEAD signed with the configured identity
    #[instrument(skip(self, message), fields(name))]
    pub fn create_annotated_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        if self.find_tag(name)?.is_some() {
            return Err(GitError::TagExists(name.to_string()));
        }

        let head = self.head_commit()?;
        let failed = |e: git2::Error| GitError::TagCreationFailed {
            name: name.to_string(),
            reason: e.message().to_string(),
        };

        let sig = self.repo.signature().map_err(failed)?;
        self.repo
            .tag(name, head.as_object(), &sig, message, false)
            .map_err(failed)?;

        info!(name, commit = %head.id(), "created annotated tag");
        Ok(TagInfo {
            name: name.to_string(),
            commit_hash: head.id().to_string(),
            message: Some(message.to_string()),
        })
    }
}
