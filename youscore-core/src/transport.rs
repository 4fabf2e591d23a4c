//! Sending requests.

use std::future::Future;

/// Capability to send a request and receive a response.
///
/// The real network stack and every decorator around it (caching, request
/// editing) implement this trait, so they compose by plain wrapping. Errors
/// are part of `Response` and travel through decorators unchanged.
///
/// # Examples
///
/// ```rust,ignore
/// use youscore_core::Transport;
/// use std::future::Ready;
///
/// struct StaticTransport {
///     response: MyResponse,
/// }
///
/// impl Transport<MyRequest> for StaticTransport {
///     type Response = Result<MyResponse, MyError>;
///     type Future = Ready<Self::Response>;
///
///     fn send(&mut self, _request: MyRequest) -> Self::Future {
///         std::future::ready(Ok(self.response.clone()))
///     }
/// }
/// ```
pub trait Transport<Req> {
    /// The response type returned by the transport
    type Response;

    /// The future that resolves to the response
    type Future: Future<Output = Self::Response> + Send;

    /// Send the request
    fn send(&mut self, request: Req) -> Self::Future;
}
