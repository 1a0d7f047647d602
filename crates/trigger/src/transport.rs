//! The outbound port the handler sends dispatch calls through.

use async_trait::async_trait;

use crate::{DispatchRequest, RemoteResponse, TransportError};

/// Sends one [`DispatchRequest`] and returns whatever the remote answered.
///
/// Implementations must not interpret the status: any response, including
/// 4xx/5xx, is `Ok`. `Err` is reserved for failures that prevent a response
/// from being obtained. Implementations must not retry.
#[async_trait]
pub trait DispatchTransport: Send + Sync {
    async fn send(&self, request: &DispatchRequest) -> Result<RemoteResponse, TransportError>;
}

#[async_trait]
impl<T> DispatchTransport for std::sync::Arc<T>
where
    T: DispatchTransport + ?Sized,
{
    async fn send(&self, request: &DispatchRequest) -> Result<RemoteResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<'a, T> DispatchTransport for &'a T
where
    T: DispatchTransport + ?Sized,
{
    async fn send(&self, request: &DispatchRequest) -> Result<RemoteResponse, TransportError> {
        (**self).send(request).await
    }
}
