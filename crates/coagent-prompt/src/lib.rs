//! Completions relay: builds a chat-completions request from a conversation
//! and forwards it to the downstream API, buffered or streamed.
//!
//! The relay owns no retry or timeout policy; a failed call surfaces
//! immediately and the caller decides what to do. The streaming variant
//! hands back the raw byte stream untouched so the caller can forward chunks
//! as they arrive.

mod error;

use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use coagent_http::{Header, StreamingResponse, Transport, TransportError};
use coagent_types::{InteropMessage, ToolCall};

pub use error::{PromptError, RedactedRequest};

/// Default completions endpoint.
pub const DEFAULT_COMPLETIONS_ENDPOINT: &str = "https://api.githubcopilot.com/chat/completions";

/// Default model requested when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4";

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const SYSTEM_PROMPT_WITH_TOOLS: &str =
    "You are a helpful assistant. Use the supplied tools to assist the user.";

/// A function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Always `"function"` on the current API.
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    pub fn function(function: FunctionDefinition) -> Self {
        Self {
            kind: "function".into(),
            function,
        }
    }
}

/// Name, description, and JSON-schema parameters of a callable function.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

/// Options for a completions call.
#[derive(Debug, Clone)]
pub struct PromptOptions {
    /// Bearer token for the completions endpoint.
    pub token: String,
    pub model: String,
    pub endpoint: String,
    /// Prior conversation turns, inserted between the system message and the
    /// new user prompt.
    pub messages: Vec<InteropMessage>,
    /// When set, switches the system message to its tool-use form and asks
    /// the model to pick tools automatically.
    pub tools: Option<Vec<ToolDefinition>>,
}

impl PromptOptions {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_COMPLETIONS_ENDPOINT.into(),
            messages: Vec::new(),
            tools: None,
        }
    }
}

/// The assistant message returned by a completions call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub role: String,
    /// `None` when the model answered with tool calls only.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

/// Outcome of a buffered [`prompt`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptReply {
    /// The `x-request-id` response header, when present.
    pub request_id: Option<String>,
    /// The first choice's message.
    pub message: AssistantMessage,
}

/// Outcome of a [`prompt_streaming`] call: the raw response body, chunk by
/// chunk, in arrival order, format dictated by the downstream API.
pub struct PromptStream {
    /// The `x-request-id` response header, when present.
    pub request_id: Option<String>,
    pub body: BoxStream<'static, Result<Bytes, TransportError>>,
}

impl std::fmt::Debug for PromptStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptStream")
            .field("request_id", &self.request_id)
            .field("body", &"<stream>")
            .finish()
    }
}

/// Tool calls requested by the model, empty when there are none.
pub fn function_calls(message: &AssistantMessage) -> &[ToolCall] {
    message.tool_calls.as_deref().unwrap_or_default()
}

#[derive(Serialize)]
struct CompletionsRequest<'a> {
    messages: Vec<InteropMessage>,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(rename = "toolChoice", skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Deserialize)]
struct CompletionsResponse {
    #[serde(default)]
    choices: Vec<CompletionsChoice>,
}

#[derive(Deserialize)]
struct CompletionsChoice {
    message: AssistantMessage,
}

fn build_messages(user_prompt: Option<&str>, options: &PromptOptions) -> Vec<InteropMessage> {
    let system = if options.tools.is_some() {
        SYSTEM_PROMPT_WITH_TOOLS
    } else {
        SYSTEM_PROMPT
    };
    let mut messages = Vec::with_capacity(options.messages.len() + 2);
    messages.push(InteropMessage::new("system", system));
    messages.extend(options.messages.iter().cloned());
    if let Some(user_prompt) = user_prompt {
        messages.push(InteropMessage::new("user", user_prompt));
    }
    messages
}

fn build_body(
    user_prompt: Option<&str>,
    options: &PromptOptions,
    stream: bool,
) -> Result<String, PromptError> {
    let request = CompletionsRequest {
        messages: build_messages(user_prompt, options),
        model: &options.model,
        tools: options.tools.as_deref(),
        tool_choice: options.tools.as_ref().map(|_| "auto"),
        stream,
    };
    serde_json::to_string(&request).map_err(PromptError::EncodeRequest)
}

fn build_headers(token: &str) -> Vec<Header> {
    vec![
        ("accept".into(), "application/json".into()),
        (
            "content-type".into(),
            "application/json; charset=UTF-8".into(),
        ),
        ("authorization".into(), format!("Bearer {token}")),
    ]
}

fn redact(url: &str, headers: &[Header], body: &str) -> RedactedRequest {
    let headers = headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case("authorization") {
                (name.clone(), "Bearer [REDACTED]".to_string())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect();
    RedactedRequest {
        method: "POST",
        url: url.to_owned(),
        headers,
        body: body.to_owned(),
    }
}

/// Sends the conversation (plus an optional new user turn) to the completions
/// endpoint and returns the first choice.
///
/// A non-success response raises [`PromptError::Api`] with the bearer token
/// redacted; nothing is synthesized on failure.
pub async fn prompt(
    transport: &dyn Transport,
    user_prompt: Option<&str>,
    options: &PromptOptions,
) -> Result<PromptReply, PromptError> {
    let body = build_body(user_prompt, options, false)?;
    let headers = build_headers(&options.token);
    tracing::debug!(endpoint = %options.endpoint, model = %options.model, "sending prompt");

    let response = transport
        .post(&options.endpoint, &headers, body.clone())
        .await?;
    if !response.is_success() {
        let text = response.text();
        return Err(PromptError::Api {
            request: redact(&options.endpoint, &headers, &body),
            status: response.status,
            headers: response.headers,
            body: text,
        });
    }

    let request_id = response.header("x-request-id").map(str::to_owned);
    let decoded: CompletionsResponse =
        serde_json::from_slice(&response.body).map_err(PromptError::MalformedResponse)?;
    let choice = decoded.choices.into_iter().next().ok_or(PromptError::NoChoices)?;

    Ok(PromptReply {
        request_id,
        message: choice.message,
    })
}

/// Like [`prompt`], but returns the raw response body as a chunk stream for
/// the caller to relay. Chunks are forwarded in arrival order and never
/// buffered whole.
pub async fn prompt_streaming(
    transport: &dyn Transport,
    user_prompt: Option<&str>,
    options: &PromptOptions,
) -> Result<PromptStream, PromptError> {
    let body = build_body(user_prompt, options, true)?;
    let headers = build_headers(&options.token);
    tracing::debug!(endpoint = %options.endpoint, model = %options.model, "sending streaming prompt");

    let response = transport
        .post_stream(&options.endpoint, &headers, body.clone())
        .await?;
    if !response.is_success() {
        let StreamingResponse {
            status,
            headers: response_headers,
            body: mut chunks,
        } = response;
        // error path only: the body is small, buffer it for diagnosis
        let mut collected = Vec::new();
        while let Some(chunk) = chunks.next().await {
            collected.extend_from_slice(&chunk?);
        }
        return Err(PromptError::Api {
            request: redact(&options.endpoint, &headers, &body),
            status,
            headers: response_headers,
            body: String::from_utf8_lossy(&collected).into_owned(),
        });
    }

    let request_id = response.header("x-request-id").map(str::to_owned);
    Ok(PromptStream {
        request_id,
        body: response.body,
    })
}
