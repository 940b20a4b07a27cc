//! Pre-flight release eligibility checks

use tracing::{debug, info};

use crate::config::ReleaseConfiguration;
use crate::error::{PolicyViolation, Result};
use crate::vcs::RepositoryInspector;

/// Dirty paths quoted in a policy violation
const DIRTY_SAMPLE_SIZE: usize = 5;

/// Enforces release-eligibility policy. Pure gate, no side effects.
pub struct PreflightValidator<'a, R: RepositoryInspector + ?Sized> {
    inspector: &'a R,
}

impl<'a, R: RepositoryInspector + ?Sized> PreflightValidator<'a, R> {
    /// Create a validator reading state from `inspector`
    pub fn new(inspector: &'a R) -> Self {
        Self { inspector }
    }

    /// Fail with a [`PolicyViolation`] if the repository may not be released
    pub fn validate(&self, config: &ReleaseConfiguration) -> Result<()> {
        debug!(
            only_from_master = config.only_from_master,
            fail_on_uncommitted_changes = config.fail_on_uncommitted_changes,
            "running pre-flight checks"
        );

        if config.only_from_master {
            let current = self.inspector.current_branch()?;
            if current.as_deref() != Some(config.primary_branch.as_str()) {
                return Err(PolicyViolation::BranchRestriction {
                    required: config.primary_branch.clone(),
                    current,
                }
                .into());
            }
        }

        if config.fail_on_uncommitted_changes && !self.inspector.is_clean()? {
            let paths = self.inspector.dirty_paths()?;
            return Err(PolicyViolation::DirtyWorkingTree {
                count: paths.len(),
                sample: paths.into_iter().take(DIRTY_SAMPLE_SIZE).collect(),
            }
            .into());
        }

        info!("pre-flight checks passed");
        Ok(())
    }
}
