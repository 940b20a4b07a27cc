//! Preflight command

use clap::Args;
use tracing::info;

use tagship_core::workflow::Step;

use super::runner::{ReleaseContext, RunOptions};
use crate::cli::{output, Cli, OutputFormat};

/// Check branch and working tree against the release policy
#[derive(Debug, Args)]
pub struct PreflightCommand {}

impl PreflightCommand {
    /// Execute the preflight command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing preflight command");
        let ctx = ReleaseContext::load(cli)?;
        ctx.run(Step::Preflight, &RunOptions::default())?;

        match cli.format {
            OutputFormat::Json => {
                let state = ctx.repo.state()?;
                let output = serde_json::json!({
                    "ok": true,
                    "repository": state,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success("Repository is ready to release");
                }
            }
        }

        Ok(())
    }
}
