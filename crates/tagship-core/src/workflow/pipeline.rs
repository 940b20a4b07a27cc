//! Named workflow steps and their ordering

use std::fmt;

/// A step of the release workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Release-eligibility checks
    Preflight,
    /// Build command and artifact resolution
    Build,
    /// Create the `releases/<version>` branch
    CreateBranch,
    /// Create the remote release, upload, tag and push
    Publish,
}

impl Step {
    /// Step name as shown in logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preflight => "publish-pre-checks",
            Self::Build => "build",
            Self::CreateBranch => "create-release-branch",
            Self::Publish => "publish",
        }
    }

    /// Steps that must complete before this one
    pub fn requires(&self) -> &'static [Step] {
        match self {
            Self::Preflight | Self::Build => &[],
            Self::CreateBranch => &[Self::Preflight],
            Self::Publish => &[Self::Preflight, Self::Build],
        }
    }

    /// All steps
    pub fn all() -> &'static [Step] {
        &[Self::Preflight, Self::Build, Self::CreateBranch, Self::Publish]
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order the steps needed to run `target`, predecessors first, each once
pub fn plan(target: Step) -> Vec<Step> {
    let mut ordered = Vec::new();
    visit(target, &mut ordered);
    ordered
}

fn visit(step: Step, ordered: &mut Vec<Step>) {
    if ordered.contains(&step) {
        return;
    }
    for required in step.requires() {
        visit(*required, ordered);
    }
    ordered.push(step);
}
