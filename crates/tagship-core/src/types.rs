//! Core types for tagship

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Prefix of the release branch created for a version
pub const RELEASE_BRANCH_PREFIX: &str = "releases/";

/// Tag name for a version (`v<version>`)
pub fn release_tag(version: &str) -> String {
    format!("v{}", version)
}

/// Release branch name for a version (`releases/<version>`)
pub fn release_branch_name(version: &str) -> String {
    format!("{}{}", RELEASE_BRANCH_PREFIX, version)
}

/// Version-control state read at the time of a check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryState {
    /// Current branch, `None` when HEAD is detached or unborn
    pub current_branch: Option<String>,
    /// Staged or unstaged modifications exist
    pub has_uncommitted_changes: bool,
    /// Untracked (non-ignored) files exist
    pub has_untracked_files: bool,
    /// Full hash of the HEAD commit, `None` before the first commit
    pub head_commit_hash: Option<String>,
}

impl RepositoryState {
    /// Whether the working tree has neither modifications nor untracked files
    pub fn is_clean(&self) -> bool {
        !self.has_uncommitted_changes && !self.has_untracked_files
    }
}

/// Body of the release creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub tag_name: String,
    pub name: String,
    pub target_commitish: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleaseRequest {
    /// Build the request for a version on a commit
    pub fn for_version(version: &str, commit: impl Into<String>) -> Self {
        let tag = release_tag(version);
        Self {
            body: format!("Release {}", tag),
            name: tag.clone(),
            tag_name: tag,
            target_commitish: commit.into(),
            draft: false,
            prerelease: false,
        }
    }
}

/// The parts of the release creation reply the workflow consumes
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseResponse {
    /// Endpoint accepting asset uploads for this release
    pub assets_url: String,
    /// Release id
    #[serde(default)]
    pub id: Option<u64>,
    /// Browser URL of the release
    #[serde(default)]
    pub html_url: Option<String>,
}

/// A resolved build artifact ready for upload
#[derive(Debug, Clone)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,
    /// Where the bytes were read from
    pub path: PathBuf,
    /// File contents
    pub bytes: Vec<u8>,
}

impl ReleaseAsset {
    /// Create an asset from in-memory bytes
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            bytes,
        }
    }

    /// Hex SHA-256 of the contents
    pub fn sha256(&self) -> String {
        format!("{:x}", Sha256::digest(&self.bytes))
    }
}

/// Record of an uploaded asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub name: String,
    pub size: u64,
    pub sha256: String,
}

impl From<&ReleaseAsset> for UploadedAsset {
    fn from(asset: &ReleaseAsset) -> Self {
        Self {
            name: asset.name.clone(),
            size: asset.bytes.len() as u64,
            sha256: asset.sha256(),
        }
    }
}

/// Result of a publish run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReport {
    /// Released version
    pub version: String,
    /// Tag created for the release
    pub tag: String,
    /// Commit the release points at
    pub commit: String,
    /// Browser URL of the created release
    pub release_url: Option<String>,
    /// Upload endpoint of the created release
    pub assets_url: Option<String>,
    /// Assets attached to the release
    pub uploaded: Vec<UploadedAsset>,
    /// Whether the tag reached the remote
    pub tag_pushed: bool,
    /// Whether this was a dry run
    pub dry_run: bool,
    /// When the run finished
    pub published_at: DateTime<Utc>,
}

impl PublishReport {
    /// Create an empty report for a version on a commit
    pub fn new(version: impl Into<String>, commit: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            tag: release_tag(&version),
            version,
            commit: commit.into(),
            release_url: None,
            assets_url: None,
            uploaded: Vec::new(),
            tag_pushed: false,
            dry_run: false,
            published_at: Utc::now(),
        }
    }
}
