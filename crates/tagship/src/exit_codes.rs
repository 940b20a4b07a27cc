//! Exit codes for the CLI

use tagship_core::error::GitError;
use tagship_core::TagshipError;

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Release policy violation (wrong branch, dirty tree)
pub const POLICY_ERROR: u8 = 5;

/// Release API answered unexpectedly, or the tag push failed
pub const REMOTE_ERROR: u8 = 6;

/// Transport failure
pub const NETWORK_ERROR: u8 = 7;

/// Build command or artifact failure
pub const BUILD_ERROR: u8 = 8;

/// Map a command error to the process exit code
pub fn for_error(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<TagshipError>() {
        return for_tagship_error(err);
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    ERROR
}

fn for_tagship_error(err: &TagshipError) -> u8 {
    match err {
        TagshipError::Config(_) => CONFIG_ERROR,
        TagshipError::Git(_) => GIT_ERROR,
        TagshipError::Policy(_) => POLICY_ERROR,
        TagshipError::Remote(_) => REMOTE_ERROR,
        TagshipError::Network(_) => NETWORK_ERROR,
        TagshipError::Build(_) | TagshipError::Artifact(_) => BUILD_ERROR,
        TagshipError::Io(_) | TagshipError::Json(_) => ERROR,
    }
}
