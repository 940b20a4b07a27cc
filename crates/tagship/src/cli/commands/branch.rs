//! Branch command

use clap::Args;
use tracing::info;

use tagship_core::workflow::Step;

use super::runner::{ReleaseContext, RunOptions};
use crate::cli::{output, Cli, OutputFormat};

/// Create `releases/<version>` at HEAD
#[derive(Debug, Args)]
pub struct BranchCommand {}

impl BranchCommand {
    /// Execute the branch command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!("executing branch command");
        let ctx = ReleaseContext::load(cli)?;
        let outcome = ctx.run(Step::CreateBranch, &RunOptions::default())?;
        let branch = outcome.branch.unwrap_or_default();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "version": outcome.version,
                    "branch": branch,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Created branch {}",
                        output::tag_style().apply_to(&branch)
                    ));
                }
            }
        }

        Ok(())
    }
}
