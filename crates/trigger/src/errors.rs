//! Error types for the dispatch trigger.
//!
//! [`DispatchError`] covers the three terminal failure outcomes of an
//! invocation. None of them is retried; each maps onto exactly one HTTP
//! status and JSON body via [`DispatchError::status_code`] and
//! [`DispatchError::to_body`].
//!
//! [`TransportError`] is the error half of the [`crate::DispatchTransport`]
//! port. Infrastructure crates convert their client errors into it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{TriggerBody, GITHUB_API_ERROR, INTERNAL_SERVER_ERROR, TOKEN_NOT_FOUND};

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

/// The outbound call could not produce a response at all.
///
/// Covers DNS failures, refused connections, TLS errors, timeouts imposed by
/// the client, and failures while reading the response body. A response with a
/// non-success status is **not** a transport error; see
/// [`DispatchError::RemoteRejected`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the underlying fault.
    pub message: String,
}

impl TransportError {
    /// Creates a transport error from any displayable fault.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch errors
// ---------------------------------------------------------------------------

/// Terminal failure outcomes of one trigger invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DispatchError {
    /// No token is configured. Produced before any network activity.
    #[error("dispatch token is not configured")]
    ConfigurationMissing,

    /// GitHub answered with a non-success status.
    ///
    /// Status and body are passed through verbatim for the caller to diagnose.
    #[error("GitHub rejected the dispatch with status {status}: {details}")]
    RemoteRejected {
        /// HTTP status returned by the GitHub API.
        status: u16,
        /// Raw response body text.
        details: String,
    },

    /// The outbound call failed before a response was obtained.
    #[error("dispatch transport failed: {message}")]
    TransportFailure {
        /// Message of the underlying fault.
        message: String,
    },
}

impl DispatchError {
    /// HTTP status to report to the caller for this outcome.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ConfigurationMissing => 500,
            Self::RemoteRejected { status, .. } => *status,
            Self::TransportFailure { .. } => 500,
        }
    }

    /// JSON body to report to the caller for this outcome.
    pub fn to_body(&self) -> TriggerBody {
        match self {
            Self::ConfigurationMissing => TriggerBody::failure(TOKEN_NOT_FOUND, None),
            Self::RemoteRejected { details, .. } => {
                TriggerBody::failure(GITHUB_API_ERROR, Some(details.clone()))
            }
            Self::TransportFailure { message } => {
                TriggerBody::failure(INTERNAL_SERVER_ERROR, Some(message.clone()))
            }
        }
    }
}

impl From<TransportError> for DispatchError {
    fn from(err: TransportError) -> Self {
        Self::TransportFailure {
            message: err.message,
        }
    }
}
