//! Default [`Transport`] implementation backed by `reqwest`.

use async_trait::async_trait;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::{Header, Response, StreamingResponse, Transport, TransportError};

/// User agent attached to every outgoing request.
const USER_AGENT: &str = concat!("coagent-sdk/", env!("CARGO_PKG_VERSION"));

/// [`Transport`] backed by a shared [`reqwest::Client`].
///
/// The client is cheap to clone and safe to share across tasks; embedders
/// that need timeouts or proxies configure them on the client they pass in.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a caller-configured client (timeouts, proxies, connection pools).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn build_headers(headers: &[Header]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len() + 1);
    map.insert(reqwest::header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("header {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportError::InvalidRequest(format!("header {name:?}: {e}")))?;
        map.insert(name, value);
    }
    Ok(map)
}

fn collect_headers(response: &reqwest::Response) -> Vec<Header> {
    response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

async fn buffer(response: reqwest::Response) -> Result<Response, TransportError> {
    let status = response.status().as_u16();
    let headers = collect_headers(&response);
    let body = response
        .bytes()
        .await
        .map_err(|e| TransportError::Connection(e.to_string()))?;
    Ok(Response {
        status,
        headers,
        body,
    })
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &[Header]) -> Result<Response, TransportError> {
        tracing::debug!(url, "transport GET");
        let response = self
            .client
            .get(url)
            .headers(build_headers(headers)?)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        buffer(response).await
    }

    async fn post(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<Response, TransportError> {
        tracing::debug!(url, "transport POST");
        let response = self
            .client
            .post(url)
            .headers(build_headers(headers)?)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        buffer(response).await
    }

    async fn post_stream(
        &self,
        url: &str,
        headers: &[Header],
        body: String,
    ) -> Result<StreamingResponse, TransportError> {
        tracing::debug!(url, "transport POST (streaming)");
        let response = self
            .client
            .post(url)
            .headers(build_headers(headers)?)
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = collect_headers(&response);
        let body = response
            .bytes_stream()
            .map_err(|e| TransportError::Connection(e.to_string()))
            .boxed();
        Ok(StreamingResponse {
            status,
            headers,
            body,
        })
    }
}
