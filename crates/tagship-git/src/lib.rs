//! Tagship Git - git repository operations for release publishing
//!
//! Wraps `git2` for inspection, branch and tag creation, and shells out to
//! the git CLI for pushes. [`GitRepo`] implements the core collaborator
//! traits so the workflow can drive it directly.

mod branches;
mod inspector;
mod lock;
mod remote;
mod repository;
mod status;
mod tags;

pub use lock::{PublishLock, LOCK_FILE_NAME};
pub use repository::{GitRepo, Result};
pub use tags::TagInfo;
