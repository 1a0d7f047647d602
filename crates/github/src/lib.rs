//! GitHub infrastructure adapter.
//!
//! Implements [`trigger::DispatchTransport`] on top of a [`reqwest::Client`].
//! The adapter sends the [`trigger::DispatchRequest`] exactly as built and
//! reports whatever GitHub answers; deciding what a status means is the
//! `trigger` crate's job.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** This crate must not contain domain rules. TLS, connection
//! pooling and body decoding are handled here; the [`trigger`] crate never sees
//! them.

use std::error::Error as _;

use async_trait::async_trait;
use thiserror::Error;
use trigger::{DispatchRequest, DispatchTransport, RemoteResponse, TransportError};

/// Errors raised while constructing a [`GitHubDispatchClient`].
#[derive(Debug, Error)]
pub enum GitHubClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Sends `repository_dispatch` calls to the GitHub REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GitHubDispatchClient {
    http: reqwest::Client,
}

impl GitHubDispatchClient {
    /// Creates a client with rustls TLS and no request timeout.
    pub fn new() -> Result<Self, GitHubClientError> {
        let http = reqwest::Client::builder().use_rustls_tls().build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl DispatchTransport for GitHubDispatchClient {
    async fn send(&self, request: &DispatchRequest) -> Result<RemoteResponse, TransportError> {
        let mut builder = self.http.post(request.url()).json(request.payload());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!(status, body_len = body.len(), "GitHub responded to dispatch");
        Ok(RemoteResponse::new(status, body))
    }
}

/// Flattens a reqwest error and its sources into one message.
fn transport_error(err: reqwest::Error) -> TransportError {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    TransportError::new(message)
}
