//! Publish command

use clap::Args;
use tracing::info;

use tagship_core::artifact::parse_artifact_spec;
use tagship_core::workflow::Step;

use super::runner::{ReleaseContext, RunOptions};
use crate::cli::{output, Cli, OutputFormat};

/// Create the GitHub release, upload artifacts, then tag and push
#[derive(Debug, Args)]
pub struct PublishCommand {
    /// Run checks and the build, but create nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Do not run the configured build command
    #[arg(long)]
    pub skip_build: bool,

    /// Extra or replacement artifact as NAME=PATH (repeatable)
    #[arg(long = "artifact", value_name = "NAME=PATH")]
    pub artifacts: Vec<String>,
}

impl PublishCommand {
    /// Execute the publish command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.dry_run,
            skip_build = self.skip_build,
            artifacts = self.artifacts.len(),
            "executing publish command"
        );

        let artifacts = self
            .artifacts
            .iter()
            .map(|spec| parse_artifact_spec(spec))
            .collect::<Result<Vec<_>, _>>()?;

        let ctx = ReleaseContext::load(cli)?;
        if ctx.config_path.is_none() && !cli.quiet && cli.format == OutputFormat::Text {
            output::warning("No configuration found, using defaults");
        }

        let options = RunOptions {
            dry_run: self.dry_run,
            skip_build: self.skip_build,
            artifacts,
        };
        let outcome = ctx.run(Step::Publish, &options)?;
        let report = outcome
            .report
            .ok_or_else(|| anyhow::anyhow!("publish step produced no report"))?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                if cli.quiet {
                    return Ok(());
                }
                if report.dry_run {
                    output::warning("Dry run, nothing was created");
                    output::info(&format!(
                        "Would release {} at {} with {} asset(s)",
                        output::tag_style().apply_to(&report.tag),
                        report.commit,
                        outcome.assets.len()
                    ));
                    for asset in &outcome.assets {
                        println!(
                            "{}",
                            output::key_value(
                                &asset.name,
                                &output::path_style()
                                    .apply_to(asset.path.display())
                                    .to_string()
                            )
                        );
                    }
                } else {
                    output::publish_report(&report);
                    println!();
                    output::success(&format!("Published {}", report.tag));
                }
            }
        }

        Ok(())
    }
}
