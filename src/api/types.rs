//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::llm::ChatMessage;

/// Request for one agent turn.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRequest {
    /// The user's message
    pub query: String,

    /// Conversation memory from the previous response; the client holds the
    /// only copy between requests
    #[serde(default)]
    pub memory: Vec<ChatMessage>,

    /// Extracted text of an attached file, if any
    #[serde(default)]
    pub file_content: Option<String>,

    /// Name of the attached file
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Response to one agent turn.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    /// Final assistant reply text
    pub response: String,

    /// Extended conversation memory; send it back verbatim on the next turn
    pub memory: Vec<ChatMessage>,

    /// Turn metadata
    pub meta: TurnMeta,
}

/// Metadata about a completed turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnMeta {
    /// Number of LLM calls the turn required
    pub llm_calls: usize,
}

/// Response for a parsed file upload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseFileResponse {
    /// Extracted (possibly truncated) text content
    pub content: String,

    /// Original file name
    pub file_name: String,

    /// Uploaded size in bytes
    pub file_size: usize,
}

/// JSON error envelope for all failure responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
