//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{BranchCommand, PreflightCommand, PublishCommand, StatusCommand};

/// Tagship - tag a repository and publish a GitHub release
#[derive(Debug, Parser)]
#[command(name = "tagship")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (searched from the working directory by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Version to release, overrides `version` from the configuration
    #[arg(long, global = true, env = "TAGSHIP_PUBLISH_VERSION")]
    pub release_version: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that the repository may be released from
    #[command(alias = "publish-pre-checks")]
    Preflight(PreflightCommand),

    /// Create the release branch for the version
    #[command(alias = "create-release-branch")]
    Branch(BranchCommand),

    /// Create the GitHub release, upload artifacts, then tag and push
    Publish(PublishCommand),

    /// Show repository status
    Status(StatusCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Preflight(ref cmd) => cmd.execute(&self),
            Commands::Branch(ref cmd) => cmd.execute(&self),
            Commands::Publish(ref cmd) => cmd.execute(&self),
            Commands::Status(ref cmd) => cmd.execute(&self),
        }
    }
}
