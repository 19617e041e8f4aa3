//! The inbound conversation payload and its projection types.
//!
//! Decoding is deliberately lenient: the platform adds fields over time and
//! several of them flip between `null` and `[]` across versions. Verification
//! of the raw body establishes provenance before any of this is trusted, so
//! no structural validation happens here.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::de::null_to_default;

/// A full inbound request envelope: one conversation thread plus sampling
/// parameters. `messages` is chronological; the last element is the current
/// turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRequest {
    #[serde(rename = "copilot_thread_id", default)]
    pub thread_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
    #[serde(default)]
    pub top_p: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub max_tokens: u64,
    #[serde(default)]
    pub presence_penalty: f64,
    #[serde(default)]
    pub frequency_penalty: f64,
    #[serde(rename = "copilot_skills", default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Value>,
    #[serde(default)]
    pub agent: String,
}

/// One turn in the conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "copilot_references", default, deserialize_with = "null_to_default")]
    pub references: Vec<Reference>,
    #[serde(rename = "copilot_confirmations", default, deserialize_with = "null_to_default")]
    pub confirmations: Vec<ConfirmationReply>,
    #[serde(default, deserialize_with = "null_to_default")]
    pub tool_calls: Vec<ToolCall>,
}

/// A contextual reference attached to a message (repository, file, snippet).
///
/// `data` is platform-defined and passed through opaquely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_implicit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ReferenceMetadata>,
}

/// Display hints for a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceMetadata {
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
}

/// The user's answer to a previously emitted confirmation prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationReply {
    pub state: ConfirmationState,
    pub confirmation: ConfirmationBody,
}

/// Whether the user accepted or dismissed the confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationState {
    Accepted,
    Dismissed,
}

/// The confirmation identifier plus whatever extra fields the extension
/// attached when it emitted the prompt. Extra fields keep their order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationBody {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalized confirmation answer extracted from the latest message.
#[derive(Debug, Clone, PartialEq)]
pub struct UserConfirmation {
    pub accepted: bool,
    pub id: String,
    pub metadata: Map<String, Value>,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub function: FunctionCall,
}

/// The function name and JSON-encoded arguments of a tool call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

/// A message projected down to the three fields a generic completions API
/// understands. Platform extensions (references, confirmations, tool calls)
/// are dropped by construction, which makes the projection idempotent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteropMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl InteropMessage {
    /// Convenience constructor for a role/content pair without a name.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: None,
            content: content.into(),
        }
    }
}

/// An element of an outbound errors event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    pub identifier: String,
}

/// Which part of the exchange an [`AgentError`] concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Reference,
    Function,
    Agent,
}
