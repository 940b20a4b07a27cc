//! HTTP collaborator used to reach the release API

use std::fmt;

use crate::error::NetworkError;

/// HTTP methods the release workflow needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single outbound request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

impl HttpRequest {
    /// POST a JSON document
    pub fn post_json(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body,
            content_type: Some("application/json".to_string()),
        }
    }

    /// POST raw bytes
    pub fn post_bytes(url: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            body,
            content_type: Some("application/octet-stream".to_string()),
        }
    }
}

/// Status and body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking, single-attempt request/response primitive.
///
/// Non-2xx statuses are returned as responses; only transport failures
/// are errors.
pub trait HttpGateway {
    /// Send one request and wait for the response
    fn request(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError>;
}
