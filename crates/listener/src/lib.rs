//! HTTP entry point for the dispatch trigger.
//!
//! Mounts [`TriggerHandler::handle`] on an [`axum::Router`]. The route accepts
//! any method and ignores the request entirely; the response status and JSON
//! body come straight from the [`TriggerResponse`].
//!
//! | Path | Methods | Notes |
//! |------|---------|-------|
//! | `/api/trigger` | any | Canonical trigger endpoint |
//! | `/` | any | Alias, for platforms that mount the function at its root |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP framing only. Whether a dispatch succeeded and what
//! to tell the caller is decided in the [`trigger`] crate.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use trigger::{DispatchTransport, TriggerHandler, TriggerResponse};

/// Canonical path of the trigger endpoint.
pub const TRIGGER_PATH: &str = "/api/trigger";

/// Builds the router serving the trigger endpoint.
pub fn router<T>(handler: Arc<TriggerHandler<T>>) -> Router
where
    T: DispatchTransport + 'static,
{
    Router::new()
        .route("/", any(fire::<T>))
        .route(TRIGGER_PATH, any(fire::<T>))
        .with_state(handler)
}

async fn fire<T>(
    State(handler): State<Arc<TriggerHandler<T>>>,
    method: Method,
    uri: Uri,
) -> TriggerReply
where
    T: DispatchTransport + 'static,
{
    tracing::info!(%method, path = uri.path(), "trigger requested");
    TriggerReply(handler.handle().await)
}

/// Adapts a [`TriggerResponse`] to an axum response.
#[derive(Debug)]
pub struct TriggerReply(pub TriggerResponse);

impl IntoResponse for TriggerReply {
    fn into_response(self) -> Response {
        let TriggerResponse { status, body } = self.0;
        // Statuses outside 100..=999 cannot be represented on the wire.
        let status = StatusCode::from_u16(status).unwrap_or_else(|_| {
            tracing::warn!(status, "unrepresentable status from GitHub; answering 502");
            StatusCode::BAD_GATEWAY
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trigger::TriggerBody;

    #[test]
    fn test_reply_uses_response_status() {
        let reply = TriggerReply(TriggerResponse {
            status: 404,
            body: TriggerBody::failure("GitHub API Error", Some("Not Found".into())),
        });
        assert_eq!(reply.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_reply_falls_back_to_bad_gateway_for_invalid_status() {
        let reply = TriggerReply(TriggerResponse {
            status: 42,
            body: TriggerBody::failure("GitHub API Error", Some(String::new())),
        });
        assert_eq!(reply.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_reply_is_json() {
        let reply = TriggerReply(TriggerResponse::from(Ok(())));
        let response = reply.into_response();
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
