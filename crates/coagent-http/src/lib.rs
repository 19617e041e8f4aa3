//! Pluggable HTTP transport for the coagent SDK.
//!
//! The SDK never talks to a concrete networking library directly: everything
//! goes through the [`Transport`] trait, so tests (and embedders with their
//! own HTTP stack) can substitute an implementation that replays fixtures.
//! [`ReqwestTransport`] is the default implementation.
//!
//! The transport is deliberately dumb: it does not police status codes
//! (callers decide what 304 or 4xx mean for them), applies no retries, and
//! owns no timeouts — configure those on the underlying client.

mod reqwest_transport;
pub mod testing;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;

pub use reqwest_transport::ReqwestTransport;

/// A `(name, value)` request header pair.
pub type Header = (String, String);

/// Errors surfaced by a transport implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The underlying network call failed before a response was received.
    #[error("transport error: {0}")]
    Connection(String),
    /// The request could not be constructed (bad URL or header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Response headers with lowercased names, in arrival order.
    pub headers: Vec<Header>,
    pub body: Bytes,
}

impl Response {
    /// Returns the first header with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// An HTTP response whose body is consumed as a stream of chunks.
///
/// Chunks arrive in network order and are never buffered whole; the point of
/// streaming is latency to first byte.
pub struct StreamingResponse {
    pub status: u16,
    /// Response headers with lowercased names, in arrival order.
    pub headers: Vec<Header>,
    pub body: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl StreamingResponse {
    /// Returns the first header with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The capability interface the SDK performs all HTTP through.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET and buffers the whole response.
    async fn get(&self, url: &str, headers: &[Header]) -> Result<Response, TransportError>;

    /// Issues a POST with the given body and buffers the whole response.
    async fn post(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<Response, TransportError>;

    /// Issues a POST and hands back the response body as a chunk stream.
    async fn post_stream(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<StreamingResponse, TransportError>;
}
