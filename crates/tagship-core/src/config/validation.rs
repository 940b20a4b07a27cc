//! Configuration validation

use tracing::{debug, warn};

use crate::error::{ConfigError, Result};
use crate::types::{release_branch_name, release_tag};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_release(config)?;
    validate_git(config)?;
    validate_github(config)?;
    if let Some(version) = &config.version {
        validate_version(version)?;
    }
    debug!("configuration validation passed");
    Ok(())
}

fn validate_release(config: &Config) -> Result<()> {
    if config.release.primary_branch.trim().is_empty() {
        return Err(invalid("release.primary_branch", "branch cannot be empty"));
    }

    for name in config.release.artifacts.keys() {
        if name.trim().is_empty() || name.contains('/') {
            return Err(invalid(
                "release.artifacts",
                format!("invalid asset name '{}'", name),
            ));
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty"));
    }
    Ok(())
}

fn validate_github(config: &Config) -> Result<()> {
    let url = url::Url::parse(&config.github.api_url)
        .map_err(|e| invalid("github.api_url", e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("github.api_url", "must be an http(s) URL"));
    }

    if config.github.token_env.is_empty() {
        return Err(invalid("github.token_env", "variable name cannot be empty"));
    }

    if config.github.timeout_secs == Some(0) {
        return Err(invalid("github.timeout_secs", "timeout must be positive"));
    }

    Ok(())
}

/// Check that everything needed to talk to the release API is configured
pub fn validate_publish_target(config: &Config) -> Result<String> {
    if config.github.owner.as_deref().is_none_or_empty() {
        return Err(ConfigError::MissingField("github.owner".to_string()).into());
    }
    if config.github.repo.as_deref().is_none_or_empty() {
        return Err(ConfigError::MissingField("github.repo".to_string()).into());
    }
    config
        .github
        .releases_endpoint()
        .ok_or_else(|| ConfigError::MissingField("github.repo".to_string()).into())
}

/// Validate a release version.
///
/// The version becomes part of a tag (`v<version>`) and a branch
/// (`releases/<version>`); both must be valid git ref names before anything
/// is created remotely.
/// Non-semver versions are accepted with a warning.
pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty() {
        return Err(invalid("version", "version cannot be empty"));
    }

    let tag_ref = format!("refs/tags/{}", release_tag(version));
    if !git2::Reference::is_valid_name(&tag_ref) {
        return Err(invalid(
            "version",
            format!("'{}': '{}' is not a valid tag", version, release_tag(version)),
        ));
    }

    let branch = release_branch_name(version);
    let branch_ok = git2::Branch::name_is_valid(&branch)
        .map_err(|e| invalid("version", format!("'{}': {}", version, e.message())))?;
    if !branch_ok {
        return Err(invalid(
            "version",
            format!("'{}': '{}' is not a valid branch", version, branch),
        ));
    }

    if semver::Version::parse(version).is_err() {
        warn!(version, "version is not a semantic version");
    }

    Ok(())
}

/// Pick the release version: explicit value first, then the configured one
pub fn resolve_version(explicit: Option<&str>, config: &Config) -> Result<String> {
    let version = explicit
        .or(config.version.as_deref())
        .map(str::trim)
        .ok_or_else(|| ConfigError::MissingField("version".to_string()))?;

    validate_version(version)?;
    Ok(version.to_string())
}

fn invalid(field: &str, message: impl Into<String>) -> crate::error::TagshipError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
    .into()
}

trait OptionStrExt {
    fn is_none_or_empty(&self) -> bool;
}

impl OptionStrExt for Option<&str> {
    fn is_none_or_empty(&self) -> bool {
        self.map_or(true, |s| s.trim().is_empty())
    }
}
