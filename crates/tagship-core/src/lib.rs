//! tagship Core - Core library for release publishing
//!
//! This crate provides the error types, configuration, domain types,
//! collaborator traits and workflow orchestration used to tag a repository
//! and publish a GitHub release for its build artifacts.

pub mod artifact;
pub mod config;
pub mod error;
pub mod http;
pub mod types;
pub mod vcs;
pub mod workflow;

pub use error::{Result, TagshipError};
pub use http::{HttpGateway, HttpMethod, HttpRequest, HttpResponse};
pub use types::{PublishReport, ReleaseAsset, RepositoryState};
pub use vcs::{RepositoryInspector, VersionControl};
