//! Shared wire types for the coagent SDK.
//!
//! This crate defines the data model exchanged with the platform: the signing
//! keys it publishes for request verification, the inbound conversation
//! payload, and the projection types used when relaying a conversation to an
//! OpenAI-compatible completions API.
//!
//! No crate in the workspace depends on anything *except* `coagent-types` for
//! cross-cutting type definitions. This keeps the dependency graph clean and
//! prevents circular dependencies.

mod de;
mod keys;
mod request;

pub use keys::{KeyCache, SigningKey};
pub use request::{
    AgentError, AgentRequest, ConfirmationBody, ConfirmationReply, ConfirmationState, ErrorKind,
    FunctionCall, InteropMessage, Message, Reference, ReferenceMetadata, ToolCall,
    UserConfirmation,
};
