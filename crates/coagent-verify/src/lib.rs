//! Inbound request verification for the coagent SDK.
//!
//! The platform signs every request it sends to an extension with a rotating
//! set of published ECDSA P-256 keys. This crate fetches that key set (with
//! ETag-based conditional caching), validates a detached signature against
//! the raw request body, and combines the two behind
//! [`verify_request_by_key_id`].
//!
//! The key cache is an explicit value the caller threads through calls and
//! persists between requests; nothing here holds long-lived state.

mod error;
mod fetch;
mod signature;

pub use error::VerifyError;
pub use fetch::{fetch_verification_keys, KeyFetch, KeyFetchOptions, DEFAULT_KEYS_ENDPOINT};
pub use signature::verify_signature;

use coagent_http::Transport;
use coagent_types::KeyCache;

use error::require_non_empty;

/// Request header carrying the detached base64 signature of the body.
pub const SIGNATURE_HEADER: &str = "github-public-key-signature";

/// Request header carrying the identifier of the key that produced the
/// signature.
pub const KEY_ID_HEADER: &str = "github-public-key-identifier";

/// Outcome of [`verify_request_by_key_id`].
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedRequest {
    /// Whether the signature matched. `false` means a forged or corrupted
    /// request, which is an expected condition, not an error.
    pub is_valid: bool,
    /// The possibly-updated key cache. Persist this across requests to
    /// benefit from conditional fetching.
    pub cache: KeyCache,
}

/// Verifies a signed inbound request against the platform's published key
/// with the given identifier.
///
/// Arguments are validated before any I/O. The key set is fetched through
/// `options.cache`; an identifier with no matching key is a hard
/// [`VerifyError::KeyNotFound`] (a configuration problem, distinct from a
/// signature mismatch) and the signature check never runs in that case.
pub async fn verify_request_by_key_id(
    transport: &dyn Transport,
    raw_body: &str,
    signature: &str,
    key_id: &str,
    options: &KeyFetchOptions,
) -> Result<VerifiedRequest, VerifyError> {
    require_non_empty(raw_body, "payload")?;
    require_non_empty(signature, "signature")?;
    require_non_empty(key_id, "key_id")?;

    let fetched = fetch_verification_keys(transport, options).await?;

    let Some(key) = fetched.cache.find(key_id) else {
        return Err(VerifyError::KeyNotFound {
            key_id: key_id.to_owned(),
            keys: fetched.cache.keys,
        });
    };

    let is_valid = verify_signature(raw_body, signature, &key.key)?;
    Ok(VerifiedRequest {
        is_valid,
        cache: fetched.cache,
    })
}
