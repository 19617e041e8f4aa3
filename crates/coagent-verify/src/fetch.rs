//! Conditional fetch of the platform's signing-key set.

use coagent_http::{Header, Transport};
use coagent_types::{KeyCache, SigningKey};
use serde::Deserialize;

use crate::error::VerifyError;

/// Default key metadata endpoint.
pub const DEFAULT_KEYS_ENDPOINT: &str = "https://api.github.com/meta/public_keys/copilot_api";

/// Options for a key fetch.
#[derive(Debug, Clone, Default)]
pub struct KeyFetchOptions {
    /// Overrides [`DEFAULT_KEYS_ENDPOINT`] (tests, on-prem deployments).
    pub endpoint: Option<String>,
    /// Optional bearer credential, sent as `authorization: token <t>`.
    pub token: Option<String>,
    /// Cache from a previous fetch. The zero-value cache fetches
    /// unconditionally.
    pub cache: KeyCache,
}

/// Outcome of a key fetch: the cache to persist for the next call, and
/// whether the server confirmed the cached set was still current.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFetch {
    pub cache: KeyCache,
    pub from_cache: bool,
}

#[derive(Deserialize)]
struct KeyListBody {
    public_keys: Vec<SigningKey>,
}

/// Fetches the current signing-key set, using the cached entity tag to avoid
/// re-downloading an unchanged set.
///
/// A `304 Not Modified` returns the input cache untouched. A 2xx replaces the
/// cache wholesale with the response's key list and `etag` header (empty
/// string when the header is absent, making the next fetch unconditional).
/// Any other status is an error. Single attempt; retry policy belongs to the
/// caller.
pub async fn fetch_verification_keys(
    transport: &dyn Transport,
    options: &KeyFetchOptions,
) -> Result<KeyFetch, VerifyError> {
    let endpoint = options.endpoint.as_deref().unwrap_or(DEFAULT_KEYS_ENDPOINT);

    let mut headers: Vec<Header> = Vec::new();
    if let Some(token) = options.token.as_deref().filter(|t| !t.is_empty()) {
        headers.push(("authorization".into(), format!("token {token}")));
    }
    if !options.cache.etag.is_empty() {
        headers.push(("if-none-match".into(), options.cache.etag.clone()));
    }

    let response = transport.get(endpoint, &headers).await?;

    if response.status == 304 {
        tracing::debug!(etag = %options.cache.etag, "signing keys unchanged, serving from cache");
        return Ok(KeyFetch {
            cache: options.cache.clone(),
            from_cache: true,
        });
    }

    if !response.is_success() {
        return Err(VerifyError::UnexpectedStatus {
            status: response.status,
            body: response.text(),
        });
    }

    let body: KeyListBody = serde_json::from_slice(&response.body)?;
    let etag = response.header("etag").unwrap_or_default().to_owned();
    tracing::debug!(keys = body.public_keys.len(), etag = %etag, "fetched fresh signing keys");

    Ok(KeyFetch {
        cache: KeyCache {
            etag,
            keys: body.public_keys,
        },
        from_cache: false,
    })
}
