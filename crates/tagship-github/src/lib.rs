//! Tagship GitHub - release API gateway
//!
//! Implements the core [`HttpGateway`](tagship_core::http::HttpGateway) on top
//! of `reqwest`'s blocking client.

mod gateway;

pub use gateway::{GitHubGateway, API_VERSION, USER_AGENT};
