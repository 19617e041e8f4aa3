//! Scripted [`Transport`] fake for tests.
//!
//! Replays queued responses and records every call, so tests can assert both
//! on outcomes and on what was (or was not) sent over the wire without
//! touching the network.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream;

use crate::{Header, Response, StreamingResponse, Transport, TransportError};

/// One request observed by a [`FakeTransport`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<Header>,
    /// Request body; `None` for GET.
    pub body: Option<String>,
}

impl RecordedCall {
    /// Returns the first header with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| n.to_ascii_lowercase() == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }
}

/// A [`Transport`] that replays scripted responses in order.
///
/// An exhausted queue yields a `TransportError::Connection`, which doubles as
/// the fixture for network-failure tests.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<VecDeque<Response>>,
    stream_bodies: Mutex<VecDeque<(u16, Vec<Header>, Vec<Bytes>)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport that answers buffered requests with `responses`, in order.
    pub fn replying(responses: impl IntoIterator<Item = Response>) -> Self {
        let transport = Self::new();
        for response in responses {
            transport.push_response(response);
        }
        transport
    }

    /// Queues one more buffered response.
    pub fn push_response(&self, response: Response) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queues a streaming response delivered as the given chunks, in order.
    pub fn push_stream(&self, status: u16, headers: Vec<Header>, chunks: Vec<Bytes>) {
        self.stream_bodies
            .lock()
            .unwrap()
            .push_back((status, headers, chunks));
    }

    /// Every call observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, url: &str, headers: &[Header], body: Option<String>) {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url: url.to_owned(),
            headers: headers.to_vec(),
            body,
        });
    }

    fn next_response(&self) -> Result<Response, TransportError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::Connection("no scripted response".into()))
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, headers: &[Header]) -> Result<Response, TransportError> {
        self.record("GET", url, headers, None);
        self.next_response()
    }

    async fn post(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<Response, TransportError> {
        self.record("POST", url, headers, Some(body));
        self.next_response()
    }

    async fn post_stream(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<StreamingResponse, TransportError> {
        self.record("POST", url, headers, Some(body));
        if let Some((status, headers, chunks)) = self.stream_bodies.lock().unwrap().pop_front() {
            return Ok(StreamingResponse {
                status,
                headers,
                body: Box::pin(stream::iter(chunks.into_iter().map(Ok))),
            });
        }
        // fall back to a buffered script entry, delivered as one chunk
        let response = self.next_response()?;
        Ok(StreamingResponse {
            status: response.status,
            headers: response.headers,
            body: Box::pin(stream::iter([Ok(response.body)])),
        })
    }
}
