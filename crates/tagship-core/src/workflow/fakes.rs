//! In-memory collaborators for workflow tests

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{GitError, NetworkError, Result};
use crate::http::{HttpGateway, HttpRequest, HttpResponse};
use crate::types::RepositoryState;
use crate::vcs::{RepositoryInspector, VersionControl};

/// Repository double recording every write
#[derive(Debug, Default)]
pub struct FakeRepo {
    branch: Option<String>,
    dirty: Vec<String>,
    existing_branches: Vec<String>,
    existing_tags: Vec<String>,
    fail_push: bool,
    created_branches: RefCell<Vec<String>>,
    tags: RefCell<Vec<(String, String)>>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl FakeRepo {
    pub const HEAD: &'static str = "0123456789abcdef0123456789abcdef01234567";

    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: Some(branch.to_string()),
            ..Default::default()
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_dirty(mut self, paths: &[&str]) -> Self {
        self.dirty = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn with_branch(mut self, name: &str) -> Self {
        self.existing_branches.push(name.to_string());
        self
    }

    pub fn with_existing_tag(mut self, name: &str) -> Self {
        self.existing_tags.push(name.to_string());
        self
    }

    pub fn failing_push(mut self) -> Self {
        self.fail_push = true;
        self
    }

    pub fn created_branches(&self) -> Vec<String> {
        self.created_branches.borrow().clone()
    }

    pub fn tags(&self) -> Vec<(String, String)> {
        self.tags.borrow().clone()
    }

    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl RepositoryInspector for FakeRepo {
    fn current_branch(&self) -> Result<Option<String>> {
        Ok(self.branch.clone())
    }

    fn is_clean(&self) -> Result<bool> {
        Ok(self.dirty.is_empty())
    }

    fn dirty_paths(&self) -> Result<Vec<String>> {
        Ok(self.dirty.clone())
    }

    fn head_commit_hash(&self) -> Result<String> {
        Ok(Self::HEAD.to_string())
    }

    fn repository_state(&self) -> Result<RepositoryState> {
        Ok(RepositoryState {
            current_branch: self.branch.clone(),
            has_uncommitted_changes: !self.dirty.is_empty(),
            has_untracked_files: false,
            head_commit_hash: Some(Self::HEAD.to_string()),
        })
    }
}

impl VersionControl for FakeRepo {
    fn create_branch(&self, name: &str) -> Result<()> {
        let exists = self.existing_branches.iter().any(|b| b == name)
            || self.created_branches.borrow().iter().any(|b| b == name);
        if exists {
            return Err(GitError::BranchExists(name.to_string()).into());
        }
        self.created_branches.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        if self.existing_tags.iter().any(|t| t == name) {
            return Err(GitError::TagExists(name.to_string()).into());
        }
        self.tags
            .borrow_mut()
            .push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        if self.fail_push {
            return Err(GitError::PushFailed(format!("{} rejected {}", remote, tag)).into());
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), tag.to_string()));
        Ok(())
    }
}

/// HTTP double answering from a queue and recording requests
#[derive(Debug, Default)]
pub struct FakeHttp {
    responses: RefCell<VecDeque<std::result::Result<HttpResponse, NetworkError>>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeHttp {
    pub fn new(responses: Vec<std::result::Result<HttpResponse, NetworkError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

impl HttpGateway for FakeHttp {
    fn request(&self, request: HttpRequest) -> std::result::Result<HttpResponse, NetworkError> {
        let url = request.url.clone();
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(NetworkError::new(url, "no scripted response")))
    }
}
