//! In-memory [`DispatchTransport`] for tests.
//!
//! Available to this crate's unit tests and, through the `testing` feature, to
//! downstream crates' tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::{DispatchRequest, DispatchTransport, RemoteResponse, TransportError};

#[derive(Debug, Clone)]
enum Reply {
    Respond(RemoteResponse),
    Fail(TransportError),
}

/// Returns a canned reply to every call and records what was sent.
#[derive(Debug)]
pub struct RecordingTransport {
    reply: Reply,
    calls: AtomicUsize,
    requests: Mutex<Vec<DispatchRequest>>,
}

impl RecordingTransport {
    /// Answers every call with `status` and `body`.
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Respond(RemoteResponse::new(status, body)))
    }

    /// Fails every call with a transport error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail(TransportError::new(message)))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<DispatchRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DispatchTransport for RecordingTransport {
    async fn send(&self, request: &DispatchRequest) -> Result<RemoteResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }
        match &self.reply {
            Reply::Respond(response) => Ok(response.clone()),
            Reply::Fail(err) => Err(err.clone()),
        }
    }
}
