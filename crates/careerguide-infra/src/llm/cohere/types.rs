//! Cohere Chat API types.
//!
//! These are Cohere-specific request/response structures used for HTTP
//! communication with the `/v1/chat` endpoint. They are NOT the generic
//! LLM types from careerguide-types -- those are provider-agnostic.

use serde::{Deserialize, Serialize};

use careerguide_types::llm::{Message, MessageRole};

/// Request body for the Cohere Chat API.
#[derive(Debug, Clone, Serialize)]
pub struct CohereChatRequest {
    pub model: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preamble: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chat_history: Vec<CohereChatTurn>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// A prior conversation turn in Cohere's wire format.
///
/// Cohere roles are upper-case strings: `USER` and `CHATBOT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohereChatTurn {
    pub role: String,
    pub message: String,
}

impl CohereChatTurn {
    /// Convert a generic conversation message into a Cohere turn.
    pub fn from_message(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::User => "USER",
            MessageRole::Assistant => "CHATBOT",
        };
        Self {
            role: role.to_string(),
            message: message.content.clone(),
        }
    }
}

/// Response from the Cohere Chat API.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereChatResponse {
    pub response_id: String,
    pub text: String,
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub meta: Option<CohereMeta>,
}

/// Metadata block on a Cohere response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CohereMeta {
    #[serde(default)]
    pub billed_units: Option<CohereBilledUnits>,
}

/// Billed token counts from Cohere.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CohereBilledUnits {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Error body from the Cohere API.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereErrorResponse {
    pub message: String,
}
