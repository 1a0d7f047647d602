//! Domain crate for the repository-dispatch trigger.
//!
//! An invocation reads no input from the caller. It checks that a GitHub token
//! is configured, sends one `repository_dispatch` event to a fixed repository,
//! and maps the outcome to a JSON response. Infrastructure crates implement
//! [`DispatchTransport`]; this crate never performs I/O itself.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** It defines *what* is sent and how the
//! outcome is reported; the `github` crate defines *how* it is sent and the
//! `listener` crate how it is exposed over HTTP.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`RepositoryOwner`, `EventType`, `InvocationId`, ...) and the redacting `GitHubToken` |
//! | [`types`] | Dispatch target, outbound request, remote and caller-facing responses |
//! | [`errors`] | `DispatchError` outcomes and the transport error |
//! | [`transport`] | The `DispatchTransport` port |
//! | [`handler`] | `TriggerHandler`, the invocation itself |

pub mod errors;
pub mod handler;
pub mod identifiers;
pub mod transport;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use errors::{DispatchError, TransportError};
pub use handler::TriggerHandler;
pub use identifiers::{EventType, GitHubToken, InvocationId, RepositoryName, RepositoryOwner};
pub use transport::DispatchTransport;
pub use types::{
    DispatchPayload, DispatchRequest, DispatchTarget, RemoteResponse, TriggerBody,
    TriggerResponse, ACCEPT_GITHUB_V3, DEFAULT_API_BASE, DEFAULT_EVENT_TYPE, DEFAULT_OWNER,
    DEFAULT_REPOSITORY, GITHUB_API_ERROR, INTERNAL_SERVER_ERROR, SUCCESS_MESSAGE,
    TOKEN_NOT_FOUND, USER_AGENT,
};
