//! Outbound SSE event codec.
//!
//! The platform consumes a line-oriented event stream: each event is one or
//! more `field: value` lines followed by a blank line. Only `data:` and
//! `event:` fields are ever emitted. The blank line (`\n\n`) is the frame
//! terminator; omitting it breaks stream parsing on the receiving side, so
//! every serialization here ends with it.
//!
//! Events are one closed sum type with a single serializer, so adding an
//! event kind is a compiler-checked exhaustiveness gap rather than a missed
//! function.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use coagent_types::{AgentError, Reference};

/// A confirmation prompt to put in front of the user.
///
/// The platform echoes `id` (and the metadata fields) back on the next turn
/// together with the user's accept/dismiss choice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfirmationPrompt {
    pub id: String,
    pub title: String,
    pub message: String,
    /// Extra fields carried inside the confirmation object, order-preserving.
    pub metadata: Map<String, Value>,
}

/// One outbound event, serialized to the exact wire syntax by [`to_sse`].
///
/// [`to_sse`]: AgentEvent::to_sse
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    /// Empty assistant delta acknowledging receipt.
    Ack,
    /// One assistant text token (or any text fragment).
    Text(String),
    /// A structured yes/no prompt.
    Confirmation(ConfirmationPrompt),
    /// Contextual references to attach to the response.
    References(Vec<Reference>),
    /// Errors to surface in the client UI.
    Errors(Vec<AgentError>),
    /// End of response: a stop chunk followed by the `[DONE]` sentinel.
    Done,
}

#[derive(Serialize)]
struct DeltaChunk<'a> {
    choices: [DeltaChoice<'a>; 1],
}

#[derive(Serialize)]
struct DeltaChoice<'a> {
    delta: Delta<'a>,
}

#[derive(Serialize)]
struct Delta<'a> {
    content: &'a str,
    role: &'static str,
}

#[derive(Serialize)]
struct StopChunk {
    choices: [StopChoice; 1],
}

#[derive(Serialize)]
struct StopChoice {
    finish_reason: &'static str,
    delta: NullDelta,
}

#[derive(Serialize)]
struct NullDelta {
    content: Option<()>,
}

#[derive(Serialize)]
struct ConfirmationData<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    title: &'a str,
    message: &'a str,
    confirmation: ConfirmationRef<'a>,
}

#[derive(Serialize)]
struct ConfirmationRef<'a> {
    id: &'a str,
    #[serde(flatten)]
    metadata: &'a Map<String, Value>,
}

// All shapes above serialize infallibly: struct fields in declaration order,
// string keys only.
fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).expect("event data serialization")
}

fn delta_chunk(content: &str) -> String {
    json(&DeltaChunk {
        choices: [DeltaChoice {
            delta: Delta {
                content,
                role: "assistant",
            },
        }],
    })
}

impl AgentEvent {
    /// Serializes the event to its wire form, trailing blank line included.
    pub fn to_sse(&self) -> String {
        match self {
            AgentEvent::Ack => format!("data: {}\n\n", delta_chunk("")),
            AgentEvent::Text(message) => format!("data: {}\n\n", delta_chunk(message)),
            AgentEvent::Confirmation(prompt) => {
                let data = ConfirmationData {
                    kind: "action",
                    title: &prompt.title,
                    message: &prompt.message,
                    confirmation: ConfirmationRef {
                        id: &prompt.id,
                        metadata: &prompt.metadata,
                    },
                };
                format!("event: copilot_confirmation\ndata: {}\n\n", json(&data))
            }
            AgentEvent::References(references) => {
                format!("event: copilot_references\ndata: {}\n\n", json(references))
            }
            AgentEvent::Errors(errors) => {
                format!("event: copilot_errors\ndata: {}\n\n", json(errors))
            }
            AgentEvent::Done => {
                let stop = StopChunk {
                    choices: [StopChoice {
                        finish_reason: "stop",
                        delta: NullDelta { content: None },
                    }],
                };
                format!("data: {}\n\ndata: [DONE]\n\n", json(&stop))
            }
        }
    }
}

impl fmt::Display for AgentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sse())
    }
}
