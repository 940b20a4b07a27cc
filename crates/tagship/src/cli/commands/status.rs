//! Status command

use clap::Args;
use console::style;
use tracing::info;

use tagship_core::types::{release_branch_name, release_tag};
use tagship_core::workflow::PreflightValidator;

use super::runner::ReleaseContext;
use crate::cli::{output, Cli, OutputFormat};

/// Show repository status and release readiness
#[derive(Debug, Args)]
pub struct StatusCommand {}

impl StatusCommand {
    /// Execute the status command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing status command");
        let ctx = ReleaseContext::load(cli)?;
        let state = ctx.repo.state()?;
        let version = ctx.version().ok();
        let readiness = PreflightValidator::new(&ctx.repo).validate(&ctx.config.release);
        let publish_target = ctx.config.github.releases_endpoint();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "config_found": ctx.config_path.is_some(),
                    "config_path": ctx.config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "repository": state,
                    "version": version,
                    "tag": version.as_deref().map(release_tag),
                    "branch": version.as_deref().map(release_branch_name),
                    "releases_endpoint": publish_target,
                    "ready": readiness.is_ok(),
                    "issue": readiness.as_ref().err().map(|e| e.to_string()),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{}", style("Tagship Status").bold());
                println!();

                println!("{}", style("Configuration").underlined());
                match &ctx.config_path {
                    Some(path) => println!(
                        "{}",
                        output::key_value(
                            "Config file",
                            &output::path_style().apply_to(path.display()).to_string()
                        )
                    ),
                    None => println!(
                        "{}",
                        output::key_value(
                            "Config file",
                            &format!("{} (using defaults)", style("not found").yellow())
                        )
                    ),
                }
                println!(
                    "{}",
                    output::key_value(
                        "Releases",
                        publish_target.as_deref().unwrap_or("github.owner/repo not set")
                    )
                );
                println!();

                println!("{}", style("Git").underlined());
                output::repository_state(&state);
                println!();

                println!("{}", style("Release").underlined());
                match &version {
                    Some(v) => {
                        println!(
                            "{}",
                            output::key_value("Version", &output::version_style().apply_to(v).to_string())
                        );
                        println!("{}", output::key_value("Tag", &release_tag(v)));
                        println!("{}", output::key_value("Branch", &release_branch_name(v)));
                    }
                    None => println!("{}", output::key_value("Version", "not set")),
                }
                println!();

                println!("{}", style("Release Readiness").underlined());
                match readiness {
                    Ok(()) => println!("  {}", style("✓ Ready to release").green().bold()),
                    Err(e) => println!("  {} {}", style("✗").red(), e),
                }
            }
        }

        Ok(())
    }
}
