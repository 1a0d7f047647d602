//! Value types for one trigger invocation.
//!
//! [`DispatchRequest`] is the fully-built outbound call; the `github` crate
//! sends it without adding or changing anything. [`RemoteResponse`] is what
//! comes back, and [`TriggerResponse`] is what the caller sees.

use serde::{Deserialize, Serialize};

use crate::{DispatchError, EventType, GitHubToken, RepositoryName, RepositoryOwner};

// ---------------------------------------------------------------------------
// Fixed protocol values
// ---------------------------------------------------------------------------

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// `Accept` header value pinning the REST API version.
pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";

/// `User-Agent` header value sent with every dispatch. GitHub rejects requests
/// without one.
pub const USER_AGENT: &str = "dispatch-trigger";

pub const DEFAULT_OWNER: &str = "Ch4Angelia";
pub const DEFAULT_REPOSITORY: &str = "computerscience";
pub const DEFAULT_EVENT_TYPE: &str = "trigger_update";

// Response texts
pub const SUCCESS_MESSAGE: &str = "Update triggered successfully!";
pub const TOKEN_NOT_FOUND: &str = "Server Error: Token not found.";
pub const GITHUB_API_ERROR: &str = "GitHub API Error";
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// ---------------------------------------------------------------------------
// Dispatch target
// ---------------------------------------------------------------------------

/// The repository and event a trigger fires.
///
/// Fixed per deployment. Nothing in the inbound request can change it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DispatchTarget {
    pub owner: RepositoryOwner,
    pub repository: RepositoryName,
    pub event_type: EventType,
}

impl DispatchTarget {
    /// Creates a target from its three parts.
    pub fn new(owner: RepositoryOwner, repository: RepositoryName, event_type: EventType) -> Self {
        Self {
            owner,
            repository,
            event_type,
        }
    }

    /// Path of the dispatch endpoint relative to the API base,
    /// e.g. `/repos/octocat/hello-world/dispatches`.
    pub fn dispatch_path(&self) -> String {
        format!("/repos/{}/{}/dispatches", self.owner, self.repository)
    }
}

impl Default for DispatchTarget {
    fn default() -> Self {
        Self {
            owner: RepositoryOwner::from_static(DEFAULT_OWNER),
            repository: RepositoryName::from_static(DEFAULT_REPOSITORY),
            event_type: EventType::from_static(DEFAULT_EVENT_TYPE),
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound request
// ---------------------------------------------------------------------------

/// JSON body of a `repository_dispatch` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchPayload {
    pub event_type: EventType,
}

/// A fully-built `POST /repos/{owner}/{repo}/dispatches` call.
///
/// The `Debug` impl omits the `Authorization` value.
#[derive(Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    url: String,
    authorization: String,
    payload: DispatchPayload,
}

impl DispatchRequest {
    /// Builds the dispatch call for `target` against `api_base`.
    ///
    /// A trailing `/` on `api_base` is ignored.
    pub fn build(target: &DispatchTarget, token: &GitHubToken, api_base: &str) -> Self {
        Self {
            url: format!(
                "{}{}",
                api_base.trim_end_matches('/'),
                target.dispatch_path()
            ),
            authorization: format!("token {}", token.expose()),
            payload: DispatchPayload {
                event_type: target.event_type.clone(),
            },
        }
    }

    /// Absolute URL of the dispatch endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// JSON body sent with the call.
    pub fn payload(&self) -> &DispatchPayload {
        &self.payload
    }

    /// Header name/value pairs, in the order they are sent.
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("Accept", ACCEPT_GITHUB_V3),
            ("Authorization", self.authorization.as_str()),
            ("User-Agent", USER_AGENT),
        ]
    }
}

impl std::fmt::Debug for DispatchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchRequest")
            .field("url", &self.url)
            .field("authorization", &"<redacted>")
            .field("payload", &self.payload)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Outbound result
// ---------------------------------------------------------------------------

/// Status and body text returned by the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteResponse {
    pub status: u16,
    pub body: String,
}

impl RemoteResponse {
    /// Creates a response from a status and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ---------------------------------------------------------------------------
// Caller-facing response
// ---------------------------------------------------------------------------

/// JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TriggerBody {
    Success {
        message: String,
    },
    Failure {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl TriggerBody {
    /// The body sent when GitHub accepted the dispatch.
    pub fn success() -> Self {
        Self::Success {
            message: SUCCESS_MESSAGE.to_owned(),
        }
    }

    /// An error body, with `details` omitted when `None`.
    pub fn failure(error: impl Into<String>, details: Option<String>) -> Self {
        Self::Failure {
            error: error.into(),
            details,
        }
    }
}

/// The HTTP status and JSON body a trigger invocation ends with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    pub status: u16,
    pub body: TriggerBody,
}

impl TriggerResponse {
    /// Returns `true` when the dispatch was accepted.
    pub fn is_success(&self) -> bool {
        matches!(self.body, TriggerBody::Success { .. })
    }
}

impl From<Result<(), DispatchError>> for TriggerResponse {
    fn from(outcome: Result<(), DispatchError>) -> Self {
        match outcome {
            Ok(()) => Self {
                status: 200,
                body: TriggerBody::success(),
            },
            Err(err) => Self {
                status: err.status_code(),
                body: err.to_body(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token() -> GitHubToken {
        GitHubToken::new("ghp_test").unwrap()
    }

    #[test]
    fn test_default_target_is_fixed_repository() {
        let target = DispatchTarget::default();
        assert_eq!(target.owner.as_str(), "Ch4Angelia");
        assert_eq!(target.repository.as_str(), "computerscience");
        assert_eq!(target.event_type.as_str(), "trigger_update");
    }

    #[test]
    fn test_build_targets_dispatch_endpoint() {
        let request = DispatchRequest::build(&DispatchTarget::default(), &token(), DEFAULT_API_BASE);
        assert_eq!(
            request.url(),
            "https://api.github.com/repos/Ch4Angelia/computerscience/dispatches"
        );
    }

    #[test]
    fn test_build_ignores_trailing_slash_on_base() {
        let request = DispatchRequest::build(
            &DispatchTarget::default(),
            &token(),
            "http://127.0.0.1:8080/",
        );
        assert_eq!(
            request.url(),
            "http://127.0.0.1:8080/repos/Ch4Angelia/computerscience/dispatches"
        );
    }

    #[test]
    fn test_build_sets_fixed_headers() {
        let request = DispatchRequest::build(&DispatchTarget::default(), &token(), DEFAULT_API_BASE);
        assert_eq!(
            request.headers(),
            [
                ("Accept", "application/vnd.github.v3+json"),
                ("Authorization", "token ghp_test"),
                ("User-Agent", USER_AGENT),
            ]
        );
    }

    #[test]
    fn test_payload_serialises_to_event_type_only() {
        let request = DispatchRequest::build(&DispatchTarget::default(), &token(), DEFAULT_API_BASE);
        assert_eq!(
            serde_json::to_string(request.payload()).unwrap(),
            r#"{"event_type":"trigger_update"}"#
        );
    }

    #[test]
    fn test_request_debug_redacts_authorization() {
        let request = DispatchRequest::build(&DispatchTarget::default(), &token(), DEFAULT_API_BASE);
        let debug = format!("{request:?}");
        assert!(!debug.contains("ghp_test"), "got: {debug}");
    }

    #[test]
    fn test_remote_response_success_range() {
        assert!(RemoteResponse::new(200, "").is_success());
        assert!(RemoteResponse::new(204, "").is_success());
        assert!(!RemoteResponse::new(199, "").is_success());
        assert!(!RemoteResponse::new(301, "").is_success());
        assert!(!RemoteResponse::new(404, "Not Found").is_success());
    }

    #[test]
    fn test_ok_outcome_maps_to_success_body() {
        let response = TriggerResponse::from(Ok(()));
        assert_eq!(response.status, 200);
        assert!(response.is_success());
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({ "message": "Update triggered successfully!" })
        );
    }

    #[test]
    fn test_failure_body_deserialises_untagged() {
        let body: TriggerBody =
            serde_json::from_value(json!({ "error": "GitHub API Error", "details": "x" })).unwrap();
        assert_eq!(
            body,
            TriggerBody::failure(GITHUB_API_ERROR, Some("x".into()))
        );
    }
}
