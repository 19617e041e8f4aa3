//! Error types for the completions relay.

use coagent_http::{Header, TransportError};

/// A copy of the outbound completions request safe to attach to errors and
/// logs: the authorization header is replaced before this is constructed.
#[derive(Debug, Clone)]
pub struct RedactedRequest {
    pub method: &'static str,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: String,
}

/// Errors surfaced by the completions relay.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The underlying network call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The completions API answered with a non-success status.
    ///
    /// Carries the redacted request plus the response status, headers, and
    /// body so the failure can be diagnosed without leaking the bearer token.
    #[error("completions API returned status {status}")]
    Api {
        request: RedactedRequest,
        status: u16,
        headers: Vec<Header>,
        body: String,
    },

    /// The request payload could not be encoded.
    #[error("failed to encode completions request: {0}")]
    EncodeRequest(serde_json::Error),

    /// The response body could not be decoded.
    #[error("malformed completions response: {0}")]
    MalformedResponse(serde_json::Error),

    /// The response decoded but contained no choices.
    #[error("completions response contained no choices")]
    NoChoices,
}
