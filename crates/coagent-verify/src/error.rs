//! Error types for request verification.

use coagent_http::TransportError;
use coagent_types::SigningKey;

/// Errors that can occur while fetching keys or verifying a request.
///
/// A cryptographically invalid signature is NOT represented here: forged
/// requests are an expected occurrence, so signature mismatch is a normal
/// `false` result, never an error.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// A required argument was empty. Detected before any I/O.
    #[error("invalid {0}: must be a non-empty string")]
    InvalidArgument(&'static str),

    /// No key in the fetched set matched the presented identifier.
    ///
    /// This signals a configuration or integration problem, distinct from
    /// "signature did not match". Carries the searched set for diagnosis.
    #[error("no public key found matching key identifier {key_id:?}")]
    KeyNotFound {
        key_id: String,
        keys: Vec<SigningKey>,
    },

    /// The key metadata endpoint returned a status other than 2xx or 304.
    #[error("key metadata endpoint returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The underlying network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The key metadata body could not be decoded.
    #[error("malformed key list: {0}")]
    MalformedKeyList(#[from] serde_json::Error),
}

/// Rejects empty strings before any work happens, naming the argument.
pub(crate) fn require_non_empty(value: &str, name: &'static str) -> Result<(), VerifyError> {
    if value.is_empty() {
        return Err(VerifyError::InvalidArgument(name));
    }
    Ok(())
}
