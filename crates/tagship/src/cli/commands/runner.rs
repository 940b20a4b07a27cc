//! Step runner shared by the release commands
//!
//! Each command names a target step; the runner plans the predecessors and
//! executes them in order, stopping at the first failure.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use tagship_core::artifact::{merge_artifacts, resolve_artifacts, BuildRunner};
use tagship_core::config::{load_config, load_config_or_default, resolve_version, Config};
use tagship_core::types::{PublishReport, ReleaseAsset};
use tagship_core::workflow::{
    plan, PreflightValidator, PublishOptions, ReleaseBranchCreator, ReleasePublisher, Step,
};
use tagship_core::Result;
use tagship_git::{GitRepo, PublishLock};
use tagship_github::GitHubGateway;

use crate::cli::Cli;

/// Options that only some steps read
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip remote calls and version-control writes
    pub dry_run: bool,
    /// Do not run the build command
    pub skip_build: bool,
    /// `NAME=PATH` artifact overrides, already parsed
    pub artifacts: Vec<(String, PathBuf)>,
}

/// What the executed steps produced
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub completed: Vec<Step>,
    pub version: Option<String>,
    pub branch: Option<String>,
    pub assets: Vec<ReleaseAsset>,
    pub report: Option<PublishReport>,
}

/// Repository, configuration and version for one invocation
pub struct ReleaseContext {
    pub repo: GitRepo,
    pub config: Config,
    pub config_path: Option<PathBuf>,
    release_version: Option<String>,
}

impl ReleaseContext {
    /// Load the context for the current directory and global flags
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::open(&cwd, cli.config.as_deref(), cli.release_version.clone())
    }

    /// Load the context rooted at `dir`
    pub fn open(
        dir: &Path,
        config_file: Option<&Path>,
        release_version: Option<String>,
    ) -> Result<Self> {
        let (config, config_path) = match config_file {
            Some(path) => (load_config(path)?, Some(path.to_path_buf())),
            None => load_config_or_default(dir)?,
        };
        let repo = GitRepo::discover(dir)?;

        Ok(Self {
            repo,
            config,
            config_path,
            release_version,
        })
    }

    /// Repository working tree root
    pub fn root(&self) -> &Path {
        self.repo.path()
    }

    /// Release version from the flag or environment, else the configuration
    pub fn version(&self) -> Result<String> {
        resolve_version(self.release_version.as_deref(), &self.config)
    }

    /// Run `target` and every step it requires
    pub fn run(&self, target: Step, options: &RunOptions) -> Result<RunOutcome> {
        let steps = plan(target);
        let mut outcome = RunOutcome::default();

        // Resolve everything that can fail cheaply before the first step runs
        let version = if steps.iter().any(|s| *s != Step::Preflight) {
            Some(self.version()?)
        } else {
            None
        };
        let publish_options = if steps.contains(&Step::Publish) {
            Some(PublishOptions::from_config(&self.config)?.with_dry_run(options.dry_run))
        } else {
            None
        };
        outcome.version = version.clone();
        let version = version.unwrap_or_default();

        for step in steps {
            let start = Instant::now();
            info!(step = %step, "running step");

            match step {
                Step::Preflight => {
                    PreflightValidator::new(&self.repo).validate(&self.config.release)?;
                }
                Step::Build => {
                    outcome.assets = self.build(&version, options)?;
                }
                Step::CreateBranch => {
                    let branch = ReleaseBranchCreator::new(&self.repo)
                        .create_branch(&self.config.release, &version)?;
                    outcome.branch = Some(branch);
                }
                Step::Publish => {
                    let publish_options = match &publish_options {
                        Some(publish_options) => publish_options.clone(),
                        None => PublishOptions::from_config(&self.config)?,
                    };
                    let report = self.publish(&version, &outcome.assets, publish_options)?;
                    outcome.report = Some(report);
                }
            }

            info!(
                step = %step,
                duration_ms = start.elapsed().as_millis(),
                "step complete"
            );
            outcome.completed.push(step);
        }

        Ok(outcome)
    }

    fn build(&self, version: &str, options: &RunOptions) -> Result<Vec<ReleaseAsset>> {
        match &self.config.build.command {
            Some(command) if !options.skip_build => {
                BuildRunner::new(command.as_str(), self.root()).run(version)?;
            }
            Some(_) => info!("build command skipped"),
            None => info!("no build command configured"),
        }

        let artifacts = merge_artifacts(&self.config.release, &options.artifacts);
        resolve_artifacts(&artifacts, self.root())
    }

    fn publish(
        &self,
        version: &str,
        assets: &[ReleaseAsset],
        options: PublishOptions,
    ) -> Result<PublishReport> {
        // Held until the tag is pushed or the run fails
        let _lock = if options.dry_run {
            None
        } else {
            Some(PublishLock::acquire(&self.repo)?)
        };

        let gateway = GitHubGateway::from_config(&self.config.github);
        if !gateway.has_token() && !options.dry_run {
            warn!(
                env = %self.config.github.token_env,
                "no API token set, the release API will likely reject the request"
            );
        }

        ReleasePublisher::new(&self.repo, &gateway, options).publish(
            &self.config.release,
            version,
            assets,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tagship_core::error::{ConfigError, GitError, PolicyViolation, TagshipError};
    use tagship_git::LOCK_FILE_NAME;
    use tempfile::TempDir;

    /// Repository on `master` with one commit that ignores `dist/`
    fn setup_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.set_head("refs/heads/master").unwrap();

        std::fs::write(temp.path().join(".gitignore"), "dist/\n").unwrap();
        std::fs::write(temp.path().join("README.md"), "widget\n").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(".gitignore")).unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();

        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        temp
    }

    /// Config file kept outside the repository so it does not dirty the tree
    fn write_config(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagship.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn open(repo_dir: &TempDir, config: &Path, version: Option<&str>) -> ReleaseContext {
        ReleaseContext::open(repo_dir.path(), Some(config), version.map(String::from)).unwrap()
    }

    #[test]
    fn test_preflight_target_runs_only_preflight() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config("");
        let ctx = open(&repo_dir, &config, None);

        let outcome = ctx.run(Step::Preflight, &RunOptions::default()).unwrap();
        assert_eq!(outcome.completed, vec![Step::Preflight]);
        assert!(outcome.version.is_none());
    }

    #[test]
    fn test_preflight_rejects_dirty_tree() {
        let repo_dir = setup_repo();
        std::fs::write(repo_dir.path().join("notes.txt"), "wip").unwrap();
        let (_cfg_dir, config) = write_config("");
        let ctx = open(&repo_dir, &config, None);

        let result = ctx.run(Step::Preflight, &RunOptions::default());
        assert!(matches!(
            result,
            Err(TagshipError::Policy(PolicyViolation::DirtyWorkingTree { .. }))
        ));
    }

    #[test]
    fn test_branch_target_uses_configured_version() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config("version = \"1.4.0\"\n");
        let ctx = open(&repo_dir, &config, None);

        let outcome = ctx.run(Step::CreateBranch, &RunOptions::default()).unwrap();
        assert_eq!(outcome.completed, vec![Step::Preflight, Step::CreateBranch]);
        assert_eq!(outcome.branch.as_deref(), Some("releases/1.4.0"));
        assert!(ctx.repo.has_branch("releases/1.4.0").unwrap());
    }

    #[test]
    fn test_explicit_version_overrides_config() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config("version = \"1.4.0\"\n");
        let ctx = open(&repo_dir, &config, Some("2.0.0"));

        let outcome = ctx.run(Step::CreateBranch, &RunOptions::default()).unwrap();
        assert_eq!(outcome.branch.as_deref(), Some("releases/2.0.0"));
    }

    #[test]
    fn test_missing_version_fails_before_any_step() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config("");
        let ctx = open(&repo_dir, &config, None);

        let result = ctx.run(Step::CreateBranch, &RunOptions::default());
        assert!(matches!(
            result,
            Err(TagshipError::Config(ConfigError::MissingField(ref f))) if f == "version"
        ));
    }

    #[test]
    fn test_untaggable_version_fails_before_any_step() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "[github]\nowner = \"acme\"\nrepo = \"widget\"\n\n[build]\ncommand = \"mkdir dist\"\n",
        );

        for version in ["1/.hidden", "1.lock/2"] {
            let ctx = open(&repo_dir, &config, Some(version));
            let result = ctx.run(Step::Publish, &RunOptions::default());
            assert!(
                matches!(
                    result,
                    Err(TagshipError::Config(ConfigError::InvalidValue { .. }))
                ),
                "version {:?} should be rejected",
                version
            );
        }
        assert!(!repo_dir.path().join("dist").exists());
    }

    #[test]
    fn test_publish_requires_github_target() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "version = \"1.0.0\"\n\n[build]\ncommand = \"mkdir dist\"\n",
        );
        let ctx = open(&repo_dir, &config, None);

        let result = ctx.run(Step::Publish, &RunOptions::default());
        assert!(matches!(
            result,
            Err(TagshipError::Config(ConfigError::MissingField(_)))
        ));
        assert!(!repo_dir.path().join("dist").exists());
    }

    #[test]
    fn test_publish_dry_run_resolves_artifacts() {
        let repo_dir = setup_repo();
        let (cfg_dir, config) = write_config(
            "version = \"1.0.0\"\n\n[github]\nowner = \"acme\"\nrepo = \"widget\"\n",
        );
        let artifact = cfg_dir.path().join("widget.tar.gz");
        std::fs::write(&artifact, b"archive").unwrap();
        let ctx = open(&repo_dir, &config, None);

        let options = RunOptions {
            dry_run: true,
            artifacts: vec![("widget.tar.gz".to_string(), artifact)],
            ..RunOptions::default()
        };
        let outcome = ctx.run(Step::Publish, &options).unwrap();

        assert_eq!(
            outcome.completed,
            vec![Step::Preflight, Step::Build, Step::Publish]
        );
        assert_eq!(outcome.assets.len(), 1);
        assert_eq!(outcome.assets[0].bytes, b"archive");

        let report = outcome.report.unwrap();
        assert!(report.dry_run);
        assert!(!report.tag_pushed);
        assert!(report.uploaded.is_empty());
        assert!(ctx.repo.find_tag("v1.0.0").unwrap().is_none());
        assert!(!ctx.repo.git_dir().join(LOCK_FILE_NAME).exists());
    }

    #[test]
    fn test_missing_artifact_stops_before_publish() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "version = \"1.0.0\"\n\n[github]\nowner = \"acme\"\nrepo = \"widget\"\n\n[release.artifacts]\n\"app.jar\" = \"dist/app.jar\"\n",
        );
        let ctx = open(&repo_dir, &config, None);

        let result = ctx.run(Step::Publish, &RunOptions::default());
        assert!(matches!(result, Err(TagshipError::Artifact(_))));
    }

    #[test]
    fn test_publish_refused_while_locked() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "version = \"1.0.0\"\n\n[github]\nowner = \"acme\"\nrepo = \"widget\"\n",
        );
        let ctx = open(&repo_dir, &config, None);
        let _held = PublishLock::acquire(&ctx.repo).unwrap();

        let result = ctx.run(Step::Publish, &RunOptions::default());
        assert!(matches!(
            result,
            Err(TagshipError::Git(GitError::PublishLocked(_)))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_build_output_becomes_asset() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "version = \"3.1.0\"\n\n[github]\nowner = \"acme\"\nrepo = \"widget\"\n\n[build]\ncommand = \"mkdir -p dist && printf \\\"$TAGSHIP_TAG\\\" > dist/tag.txt\"\n\n[release.artifacts]\n\"tag.txt\" = \"dist/tag.txt\"\n",
        );
        let ctx = open(&repo_dir, &config, None);

        let options = RunOptions {
            dry_run: true,
            ..RunOptions::default()
        };
        let outcome = ctx.run(Step::Publish, &options).unwrap();
        assert_eq!(outcome.assets.len(), 1);
        assert_eq!(outcome.assets[0].bytes, b"v3.1.0");
    }

    #[test]
    fn test_skip_build_leaves_command_unrun() {
        let repo_dir = setup_repo();
        let (_cfg_dir, config) = write_config(
            "version = \"1.0.0\"\n\n[github]\nowner = \"acme\"\nrepo = \"widget\"\n\n[build]\ncommand = \"exit 1\"\n",
        );
        let ctx = open(&repo_dir, &config, None);

        let options = RunOptions {
            dry_run: true,
            skip_build: true,
            ..RunOptions::default()
        };
        assert!(ctx.run(Step::Publish, &options).is_ok());
    }
}
