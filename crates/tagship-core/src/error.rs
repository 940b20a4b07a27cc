//! Error types for tagship

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TagshipError
pub type Result<T> = std::result::Result<T, TagshipError>;

/// Main error type for tagship operations
#[derive(Debug, Error)]
pub enum TagshipError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Local git errors (access and write)
    #[error(transparent)]
    Git(#[from] GitError),

    /// Pre-flight policy gate failed
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// Unexpected answer from the release API
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Transport-level failure
    #[error(transparent)]
    Network(#[from] NetworkError),

    /// Build command failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// Artifact could not be resolved or read
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No commits found
    #[error("No commits found in repository")]
    NoCommits,

    /// Branch already exists
    #[error("Branch already exists: {0}")]
    BranchExists(String),

    /// Failed to create branch
    #[error("Failed to create branch {name}: {reason}")]
    BranchCreationFailed { name: String, reason: String },

    /// Tag already exists
    #[error("Tag already exists: {0}")]
    TagExists(String),

    /// Failed to create tag
    #[error("Failed to create tag {name}: {reason}")]
    TagCreationFailed { name: String, reason: String },

    /// Failed to push
    #[error("Failed to push to remote: {0}")]
    PushFailed(String),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Another publish holds the lock
    #[error("Another publish is in progress (lock file {0})")]
    PublishLocked(PathBuf),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

impl GitError {
    /// Whether this error came from a mutating operation
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::BranchExists(_)
                | Self::BranchCreationFailed { .. }
                | Self::TagExists(_)
                | Self::TagCreationFailed { .. }
                | Self::PushFailed(_)
                | Self::PublishLocked(_)
        )
    }
}

/// Pre-flight policy violations. These are user-correctable.
#[derive(Debug, Error)]
pub enum PolicyViolation {
    /// Releases are restricted to the primary branch
    #[error(
        "Releases can only be created from the '{required}' branch (current: {}). \
         Disable release.only_from_master to override",
        .current.as_deref().unwrap_or("detached HEAD")
    )]
    BranchRestriction {
        required: String,
        current: Option<String>,
    },

    /// Working tree has modified or untracked files
    #[error(
        "Releases require a clean working tree ({} uncommitted path(s){}). \
         Disable release.fail_on_uncommitted_changes to override",
        .count,
        format_sample(.sample)
    )]
    DirtyWorkingTree { count: usize, sample: Vec<String> },
}

fn format_sample(sample: &[String]) -> String {
    if sample.is_empty() {
        String::new()
    } else {
        format!(": {}", sample.join(", "))
    }
}

/// Release API errors
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The API answered with a status the workflow does not accept
    #[error("Unexpected status code {status} while {operation}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },

    /// The API reply could not be interpreted
    #[error("Malformed response from release API: {0}")]
    MalformedResponse(String),

    /// Pushing the release tag failed
    #[error("Failed to push tag {tag}")]
    TagPushFailed {
        tag: String,
        #[source]
        source: Box<TagshipError>,
    },
}

/// Transport-level failure talking to a remote endpoint
#[derive(Debug, Error)]
#[error("Network error for {url}: {message}")]
pub struct NetworkError {
    pub url: String,
    pub message: String,
}

impl NetworkError {
    /// Create a new network error
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Build step errors
#[derive(Debug, Error)]
pub enum BuildError {
    /// The build command could not be started
    #[error("Failed to run build command '{command}': {reason}")]
    SpawnFailed { command: String, reason: String },

    /// The build command exited unsuccessfully
    #[error("Build command '{command}' failed with exit code {}: {stderr}", .exit_code.map(|c| c.to_string()).unwrap_or_else(|| "none".to_string()))]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// Artifact resolution errors
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Artifact path does not point at an existing file
    #[error("Artifact '{name}' not found at {}", .path.display())]
    NotFound { name: String, path: PathBuf },

    /// Artifact specification could not be parsed
    #[error("Invalid artifact specification '{0}', expected NAME=PATH")]
    InvalidSpec(String),

    /// Artifact could not be read
    #[error("Failed to read artifact '{name}': {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
