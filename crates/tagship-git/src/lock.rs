//! Publish lock
//!
//! At most one publish may run against a repository at a time. The lock is a
//! file inside the git directory created with `create_new`, so acquisition is
//! atomic on the local filesystem. It is removed when the guard drops.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use tagship_core::error::GitError;

use crate::repository::{GitRepo, Result};

/// Lock file name inside the git directory
pub const LOCK_FILE_NAME: &str = "tagship-publish.lock";

/// Guard that releases the publish lock when dropped
#[derive(Debug)]
pub struct PublishLock {
    path: PathBuf,
}

impl PublishLock {
    /// Take the publish lock for `repo`
    pub fn acquire(repo: &GitRepo) -> Result<Self> {
        Self::acquire_at(repo.git_dir().join(LOCK_FILE_NAME))
    }

    fn acquire_at(path: PathBuf) -> Result<Self> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // The pid is informational only
                if let Err(e) = writeln!(file, "{}", std::process::id()) {
                    warn!(path = %path.display(), error = %e, "failed to write lock owner");
                }
                debug!(path = %path.display(), "acquired publish lock");
                Ok(Self { path })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(GitError::PublishLocked(path))
            }
            Err(e) => Err(GitError::OpenFailed(format!(
                "cannot create lock file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PublishLock {
    fn drop(&mut self) {
        match fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "released publish lock"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to remove publish lock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::setup_repo;

    #[test]
    fn test_acquire_creates_lock_file() {
        let (_temp, repo) = setup_repo();
        let lock = PublishLock::acquire(&repo).unwrap();
        assert!(lock.path().exists());
        assert!(lock.path().starts_with(repo.git_dir()));

        let owner = fs::read_to_string(lock.path()).unwrap();
        assert_eq!(owner.trim(), std::process::id().to_string());
    }

    #[test]
    fn test_second_acquire_is_rejected() {
        let (_temp, repo) = setup_repo();
        let _held = PublishLock::acquire(&repo).unwrap();
        let result = PublishLock::acquire(&repo);
        assert!(matches!(result, Err(GitError::PublishLocked(_))));
    }

    #[test]
    fn test_drop_releases_lock() {
        let (_temp, repo) = setup_repo();
        let path = {
            let lock = PublishLock::acquire(&repo).unwrap();
            lock.path().to_path_buf()
        };
        assert!(!path.exists());
        PublishLock::acquire(&repo).unwrap();
    }

    #[test]
    fn test_stale_lock_blocks_until_removed() {
        let (_temp, repo) = setup_repo();
        let path = repo.git_dir().join(LOCK_FILE_NAME);
        fs::write(&path, "12345\n").unwrap();

        assert!(matches!(
            PublishLock::acquire(&repo),
            Err(GitError::PublishLocked(p)) if p == path
        ));

        fs::remove_file(&path).unwrap();
        assert!(PublishLock::acquire(&repo).is_ok());
    }
}
