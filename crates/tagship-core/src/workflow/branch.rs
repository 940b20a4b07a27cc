//! Release branch creation

use tracing::info;

use crate::config::ReleaseConfiguration;
use crate::error::Result;
use crate::types::release_branch_name;
use crate::vcs::VersionControl;

use super::preflight::PreflightValidator;

/// Creates `releases/<version>` at HEAD once the pre-flight checks pass
pub struct ReleaseBranchCreator<'a, V: VersionControl + ?Sized> {
    vcs: &'a V,
}

impl<'a, V: VersionControl + ?Sized> ReleaseBranchCreator<'a, V> {
    pub fn new(vcs: &'a V) -> Self {
        Self { vcs }
    }

    /// Validate, then create the release branch. Returns the branch name.
    pub fn create_branch(&self, config: &ReleaseConfiguration, version: &str) -> Result<String> {
        PreflightValidator::new(self.vcs).validate(config)?;

        let name = release_branch_name(version);
        self.vcs.create_branch(&name)?;
        info!(branch = %name, "created release branch");
        Ok(name)
    }
}
