//! The dispatch trigger handler.
//!
//! One invocation is one linear sequence: check the token, build the request,
//! send it once, map the outcome. There is no state shared between
//! invocations beyond the immutable configuration held by [`TriggerHandler`].

use tracing::Instrument;

use crate::{
    DispatchError, DispatchRequest, DispatchTarget, DispatchTransport, GitHubToken, InvocationId,
    TriggerResponse, DEFAULT_API_BASE,
};

/// Fires a `repository_dispatch` event at a fixed target.
///
/// Configuration (token, target, API base) is injected at construction; the
/// handler never reads the process environment itself.
pub struct TriggerHandler<T> {
    transport: T,
    token: Option<GitHubToken>,
    target: DispatchTarget,
    api_base: String,
}

impl<T> TriggerHandler<T>
where
    T: DispatchTransport,
{
    /// Creates a handler for the default target on the public GitHub API.
    ///
    /// A `None` token is accepted: every invocation then fails with
    /// [`DispatchError::ConfigurationMissing`].
    pub fn new(transport: T, token: Option<GitHubToken>) -> Self {
        Self {
            transport,
            token,
            target: DispatchTarget::default(),
            api_base: DEFAULT_API_BASE.to_owned(),
        }
    }

    /// Replaces the default dispatch target.
    pub fn with_target(mut self, target: DispatchTarget) -> Self {
        self.target = target;
        self
    }

    /// Overrides the API base URL (GitHub Enterprise, or a mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// The repository and event this handler fires.
    pub fn target(&self) -> &DispatchTarget {
        &self.target
    }

    /// Returns `true` if a token was configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Runs one invocation and returns the response for the caller.
    ///
    /// Never fails: every outcome, including transport faults, is a
    /// [`TriggerResponse`].
    pub async fn handle(&self) -> TriggerResponse {
        let invocation_id = InvocationId::new_random();
        let span = tracing::info_span!(
            "invocation",
            %invocation_id,
            owner = %self.target.owner,
            repo = %self.target.repository,
            event_type = %self.target.event_type,
        );

        async {
            let response = TriggerResponse::from(self.dispatch().await);
            tracing::debug!(status = response.status, "invocation finished");
            response
        }
        .instrument(span)
        .await
    }

    /// Sends the dispatch event, returning the failure outcome if any.
    pub async fn dispatch(&self) -> Result<(), DispatchError> {
        let Some(token) = self.token.as_ref() else {
            tracing::warn!("dispatch token is not configured; skipping GitHub call");
            return Err(DispatchError::ConfigurationMissing);
        };

        let request = DispatchRequest::build(&self.target, token, &self.api_base);
        tracing::debug!(url = request.url(), "sending repository dispatch");

        let response = self.transport.send(&request).await.map_err(|err| {
            tracing::error!(error = %err, "repository dispatch transport failed");
            DispatchError::from(err)
        })?;

        if response.is_success() {
            tracing::info!(status = response.status, "repository dispatch accepted");
            Ok(())
        } else {
            tracing::warn!(
                status = response.status,
                body = %response.body,
                "repository dispatch rejected by GitHub"
            );
            Err(DispatchError::RemoteRejected {
                status: response.status,
                details: response.body,
            })
        }
    }
}
