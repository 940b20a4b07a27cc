//! Build step and artifact resolution

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info, warn};

use crate::config::ReleaseConfiguration;
use crate::error::{ArtifactError, BuildError, Result};
use crate::types::{release_tag, ReleaseAsset};

/// Lines of stderr kept in a build failure message
const STDERR_TAIL_LINES: usize = 20;

/// Runs the configured build command before artifacts are read
#[derive(Debug, Clone)]
pub struct BuildRunner {
    command: String,
    cwd: PathBuf,
}

impl BuildRunner {
    /// Create a runner for a shell command executed in `cwd`
    pub fn new(command: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            cwd: cwd.into(),
        }
    }

    /// Run the command with the release version in its environment
    pub fn run(&self, version: &str) -> Result<()> {
        let start = std::time::Instant::now();
        info!(command = %self.command, cwd = %self.cwd.display(), "running build command");

        let shell = if cfg!(windows) { "cmd" } else { "sh" };
        let shell_arg = if cfg!(windows) { "/C" } else { "-c" };

        let output = Command::new(shell)
            .arg(shell_arg)
            .arg(&self.command)
            .current_dir(&self.cwd)
            .env("TAGSHIP_VERSION", version)
            .env("TAGSHIP_TAG", release_tag(version))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| BuildError::SpawnFailed {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        let duration_ms = start.elapsed().as_millis();

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::CommandFailed {
                command: self.command.clone(),
                exit_code: output.status.code(),
                stderr: tail(&stderr, STDERR_TAIL_LINES),
            }
            .into());
        }

        debug!(
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "build output captured"
        );
        info!(duration_ms, "build command finished");
        Ok(())
    }
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.trim_end().lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

/// Parse a `NAME=PATH` artifact override
pub fn parse_artifact_spec(spec: &str) -> Result<(String, PathBuf)> {
    match spec.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
            Ok((name.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(ArtifactError::InvalidSpec(spec.to_string()).into()),
    }
}

/// Merge configured artifacts with overrides; overrides win by name
pub fn merge_artifacts(
    config: &ReleaseConfiguration,
    overrides: &[(String, PathBuf)],
) -> BTreeMap<String, PathBuf> {
    let mut artifacts = config.artifacts.clone();
    for (name, path) in overrides {
        artifacts.insert(name.clone(), path.clone());
    }
    artifacts
}

/// Check that every artifact resolves to an existing file and read it.
///
/// Relative paths resolve against `base_dir`. All paths are checked before
/// any file is read, so a missing artifact fails without partial reads.
pub fn resolve_artifacts(
    artifacts: &BTreeMap<String, PathBuf>,
    base_dir: &Path,
) -> Result<Vec<ReleaseAsset>> {
    let resolved: Vec<(String, PathBuf)> = artifacts
        .iter()
        .map(|(name, path)| {
            let full = if path.is_absolute() {
                path.clone()
            } else {
                base_dir.join(path)
            };
            (name.clone(), full)
        })
        .collect();

    for (name, path) in &resolved {
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                name: name.clone(),
                path: path.clone(),
            }
            .into());
        }
    }

    if resolved.is_empty() {
        warn!("no artifacts configured, the release will have no assets");
    }

    let mut assets = Vec::with_capacity(resolved.len());
    for (name, path) in resolved {
        let bytes = std::fs::read(&path).map_err(|source| ArtifactError::ReadFailed {
            name: name.clone(),
            source,
        })?;
        debug!(name = %name, path = %path.display(), size = bytes.len(), "read artifact");
        assets.push(ReleaseAsset::new(name, path, bytes));
    }

    Ok(assets)
}
