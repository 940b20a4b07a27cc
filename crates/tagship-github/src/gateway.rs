//! Blocking GitHub REST gateway

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header;
use tracing::{debug, instrument};

use tagship_core::config::GitHubConfig;
use tagship_core::error::NetworkError;
use tagship_core::http::{HttpGateway, HttpMethod, HttpRequest, HttpResponse};

/// REST API version pinned on every request
pub const API_VERSION: &str = "2022-11-28";

/// Default `User-Agent`; GitHub rejects requests without one
pub const USER_AGENT: &str = concat!("tagship/", env!("CARGO_PKG_VERSION"));

/// [`HttpGateway`] speaking to the GitHub REST API.
///
/// A new client is built for every request, so no connection is reused
/// between the release creation and the asset uploads.
#[derive(Debug, Clone)]
pub struct GitHubGateway {
    token: Option<String>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl GitHubGateway {
    /// Gateway without credentials or timeout
    pub fn new() -> Self {
        Self {
            token: None,
            timeout: None,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Gateway configured from the `github` section; the token is read from
    /// the environment variable it names
    pub fn from_config(config: &GitHubConfig) -> Self {
        let token = config.token();
        if token.is_none() {
            debug!(env = %config.token_env, "no API token in environment");
        }
        Self {
            token,
            timeout: config.timeout_secs.map(Duration::from_secs),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Send `Authorization: Bearer <token>`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Abort requests that take longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether a token will be sent
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn client(&self, url: &str) -> Result<Client, NetworkError> {
        let mut builder = Client::builder().user_agent(&self.user_agent);
        // reqwest's blocking client defaults to 30s; only set one when asked
        builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder.timeout(None::<Duration>),
        };
        builder
            .build()
            .map_err(|e| NetworkError::new(url, format!("failed to build HTTP client: {}", e)))
    }
}

impl Default for GitHubGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGateway for GitHubGateway {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    fn request(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let client = self.client(&request.url)?;
        let start = Instant::now();

        let mut builder = match request.method {
            HttpMethod::Post => client.post(&request.url),
        }
        .header(header::ACCEPT, "application/vnd.github+json")
        .header("X-GitHub-Api-Version", API_VERSION);

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = builder
            .body(request.body)
            .send()
            .map_err(|e| NetworkError::new(&request.url, e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| NetworkError::new(&request.url, format!("failed to read body: {}", e)))?;

        debug!(
            status,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis(),
            "received response"
        );
        Ok(HttpResponse { status, body })
    }
}
