//! CLI commands

mod branch;
mod preflight;
mod publish;
mod runner;
mod status;

pub use branch::BranchCommand;
pub use preflight::PreflightCommand;
pub use publish::PublishCommand;
pub use status::StatusCommand;
