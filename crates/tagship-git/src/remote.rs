//! Remote operations
//!
//! Pushes go through the git CLI so configured credential helpers and SSH
//! agents apply. Exit status is checked; output is only kept for errors.

use std::process::Command;

use tracing::{debug, info, instrument};

use tagship_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get list of remote names
    pub fn remotes(&self) -> Result<Vec<String>> {
        let remotes = self.repo.remotes()?;
        Ok(remotes
            .iter()
            .filter_map(|r| r.map(|s| s.to_string()))
            .collect())
    }

    /// Check if a remote exists
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.remotes()?.iter().any(|r| r == name))
    }

    /// Push a single tag to a remote using the git CLI
    #[instrument(skip(self), fields(remote_name, tag_name))]
    pub fn push_tag(&self, remote_name: &str, tag_name: &str) -> Result<()> {
        if !self.has_remote(remote_name)? {
            return Err(GitError::RemoteNotFound(remote_name.to_string()));
        }

        let git = which::which("git")
            .map_err(|e| GitError::PushFailed(format!("git executable not found: {}", e)))?;

        let start = std::time::Instant::now();
        let refspec = format!("refs/tags/{}:refs/tags/{}", tag_name, tag_name);
        debug!(git = %git.display(), refspec = %refspec, "invoking git push");

        let output = Command::new(git)
            .arg("-C")
            .arg(self.path())
            .args(["push", "--porcelain", remote_name, &refspec])
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| GitError::PushFailed(format!("failed to run git: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GitError::PushFailed(format!(
                "git push {} {} exited with {}: {}",
                remote_name,
                tag_name,
                output
                    .status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "signal".to_string()),
                stderr.trim()
            )));
        }

        info!(
            remote = remote_name,
            tag = tag_name,
            duration_ms = start.elapsed().as_millis(),
            "pushed tag"
        );
        Ok(())
    }
}
