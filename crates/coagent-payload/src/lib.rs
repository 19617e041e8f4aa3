//! Decoding and inspection of the inbound conversation payload.
//!
//! Parsing is a pure JSON decode with no structural validation: provenance is
//! established by `coagent-verify` on the raw body *before* the payload is
//! trusted, and that ordering is the caller's responsibility.

use coagent_http::Transport;
use coagent_types::{AgentRequest, InteropMessage, UserConfirmation};
use coagent_verify::{verify_request_by_key_id, KeyFetchOptions, VerifyError};

/// Errors that can occur while parsing or verify-and-parsing a request body.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The body could not be decoded as JSON.
    #[error("malformed request body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// Verification failed before parsing was attempted.
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Outcome of [`verify_and_parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayload {
    /// Whether the signature matched the platform's published key.
    pub is_valid: bool,
    /// The decoded payload. Only trust this when `is_valid` is `true`.
    pub payload: AgentRequest,
}

/// Decodes a raw request body into an [`AgentRequest`].
pub fn parse_request_body(raw_body: &str) -> Result<AgentRequest, PayloadError> {
    Ok(serde_json::from_str(raw_body)?)
}

/// Returns the content of the latest (current-turn) message.
///
/// An empty message list is a precondition violation by the caller and yields
/// `None`.
pub fn latest_user_message(payload: &AgentRequest) -> Option<&str> {
    payload.messages.last().map(|m| m.content.as_str())
}

/// Returns the user's answer to a previously emitted confirmation prompt, if
/// the current turn carries one.
///
/// Only the latest message's first confirmation entry is inspected. The
/// confirmation id is extracted; every other field of the confirmation body
/// is surfaced as free-form metadata.
pub fn user_confirmation(payload: &AgentRequest) -> Option<UserConfirmation> {
    let reply = payload.messages.last()?.confirmations.first()?;
    Some(UserConfirmation {
        accepted: reply.state == coagent_types::ConfirmationState::Accepted,
        id: reply.confirmation.id.clone(),
        metadata: reply.confirmation.extra.clone(),
    })
}

/// Projects the conversation down to the role/name/content triples a generic
/// completions API understands, dropping platform extensions.
pub fn interop_messages(payload: &AgentRequest) -> Vec<InteropMessage> {
    payload
        .messages
        .iter()
        .map(|m| InteropMessage {
            role: m.role.clone(),
            name: m.name.clone(),
            content: m.content.clone(),
        })
        .collect()
}

/// Verifies the raw body against the platform's published key and decodes it
/// in one step.
///
/// This convenience form does not thread the key cache: every call fetches
/// (conditionally, if `options.cache` is populated) and the updated cache is
/// discarded. Callers that want cross-request caching should use
/// [`coagent_verify::verify_request_by_key_id`] directly and parse the body
/// themselves.
pub async fn verify_and_parse(
    transport: &dyn Transport,
    raw_body: &str,
    signature: &str,
    key_id: &str,
    options: &KeyFetchOptions,
) -> Result<VerifiedPayload, PayloadError> {
    let verified = verify_request_by_key_id(transport, raw_body, signature, key_id, options).await?;
    Ok(VerifiedPayload {
        is_valid: verified.is_valid,
        payload: parse_request_body(raw_body)?,
    })
}
