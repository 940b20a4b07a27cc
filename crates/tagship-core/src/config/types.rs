//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for tagship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version to release when none is given on the command line
    pub version: Option<String>,

    /// Release policy and artifacts
    pub release: ReleaseConfiguration,

    /// Git configuration
    pub git: GitConfig,

    /// GitHub API configuration
    pub github: GitHubConfig,

    /// Build step configuration
    pub build: BuildConfig,
}

/// Release policy and artifacts, immutable for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfiguration {
    /// Artifacts to attach to the release, by asset name
    pub artifacts: BTreeMap<String, PathBuf>,

    /// Whether releases can only be created from the primary branch
    pub only_from_master: bool,

    /// Stops the release if there are uncommitted changes
    pub fail_on_uncommitted_changes: bool,

    /// Branch that `only_from_master` refers to
    pub primary_branch: String,
}

impl Default for ReleaseConfiguration {
    fn default() -> Self {
        Self {
            artifacts: BTreeMap::new(),
            only_from_master: true,
            fail_on_uncommitted_changes: true,
            primary_branch: "master".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote the release tag is pushed to
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Base URL of the REST API
    pub api_url: String,

    /// Repository owner
    pub owner: Option<String>,

    /// Repository name
    pub repo: Option<String>,

    /// Environment variable holding the API token
    pub token_env: String,

    /// Request timeout in seconds (none by default)
    pub timeout_secs: Option<u64>,

    /// Fail the release when an asset upload is not answered with 2xx
    pub check_upload_status: bool,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            owner: None,
            repo: None,
            token_env: "GITHUB_TOKEN".to_string(),
            timeout_secs: None,
            check_upload_status: true,
        }
    }
}

impl GitHubConfig {
    /// URL of the releases collection, if owner and repo are configured
    pub fn releases_endpoint(&self) -> Option<String> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Some(format!(
                "{}/repos/{}/{}/releases",
                self.api_url.trim_end_matches('/'),
                owner,
                repo
            )),
            _ => None,
        }
    }

    /// Read the API token from the configured environment variable
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Build step configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Shell command producing the artifacts
    pub command: Option<String>,
}
