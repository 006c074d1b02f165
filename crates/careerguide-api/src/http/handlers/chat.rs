//! Advisor chat endpoint.
//!
//! POST /api/v1/chat
//!
//! Unlike the session routes, this endpoint speaks a flat JSON contract:
//! `{"reply": "..."}` on success and `{"error": "..."}` on failure. It
//! loads the session's history, calls the advisor gateway, and returns
//! the generated reply without writing anything. Clients record both
//! sides of the turn through the session message route afterwards.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info_span};
use uuid::Uuid;

use careerguide_observe::genai_attrs;

use crate::http::extractors::auth::Identity;
use crate::state::AppState;

/// Request body for the chat endpoint.
///
/// The wire field is `sessionId`. Both fields deserialize as raw JSON
/// values so that a missing or wrong-typed field surfaces as that
/// field's own validation message rather than a generic deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default, rename = "sessionId")]
    pub session_id: serde_json::Value,
    #[serde(default)]
    pub message: serde_json::Value,
}

/// Successful chat response body.
#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Chat endpoint failures, rendered as flat `{"error": "..."}` bodies.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatApiError {
    InvalidJson,
    MessageRequired,
    SessionIdRequired,
    SessionNotFound,
    ServiceFailed,
}

impl ChatApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            ChatApiError::InvalidJson => (StatusCode::BAD_REQUEST, "Invalid JSON format"),
            ChatApiError::MessageRequired => (StatusCode::BAD_REQUEST, "Message is required"),
            ChatApiError::SessionIdRequired => (StatusCode::BAD_REQUEST, "Session ID is required"),
            ChatApiError::SessionNotFound => (StatusCode::NOT_FOUND, "Session not found"),
            ChatApiError::ServiceFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "AI service error. Please try again.",
            ),
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

/// POST /api/v1/chat - Generate an advisor reply for a session.
///
/// The session must exist and belong to the caller before the provider
/// is contacted; nothing is persisted either way.
pub async fn chat(
    State(state): State<AppState>,
    Identity(claims): Identity,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatApiError> {
    let Ok(Json(body)) = body else {
        return Err(ChatApiError::InvalidJson);
    };

    let message = match body.message.as_str().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(ChatApiError::MessageRequired),
    };

    let session_id = match body.session_id.as_str().map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => return Err(ChatApiError::SessionIdRequired),
    };

    // An unparseable id can't name an existing session
    let Ok(session_id) = session_id.parse::<Uuid>() else {
        return Err(ChatApiError::SessionNotFound);
    };

    let history = state
        .chat_service
        .get_session(&claims.sub, &session_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load session history");
            ChatApiError::ServiceFailed
        })?
        .ok_or(ChatApiError::SessionNotFound)?;

    let span = info_span!(
        "gen_ai.chat",
        gen_ai.operation.name = genai_attrs::OP_CHAT,
        gen_ai.provider.name = state.advisor.provider_name(),
        gen_ai.request.model = state.advisor.model(),
        gen_ai.request.temperature = state.config.advisor.temperature,
        gen_ai.request.max_tokens = state.config.advisor.max_tokens,
        gen_ai.response.id = tracing::field::Empty,
        gen_ai.response.finish_reasons = tracing::field::Empty,
        gen_ai.usage.input_tokens = tracing::field::Empty,
        gen_ai.usage.output_tokens = tracing::field::Empty,
    );

    let reply = state
        .advisor
        .generate_reply(&history.messages, &message)
        .instrument(span.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, session_id = %session_id, "advisor reply failed");
            ChatApiError::ServiceFailed
        })?;

    span.record(genai_attrs::GEN_AI_RESPONSE_ID, reply.response_id.as_str());
    span.record(
        genai_attrs::GEN_AI_RESPONSE_FINISH_REASONS,
        reply.finish_reason.to_string().as_str(),
    );
    span.record(genai_attrs::GEN_AI_USAGE_INPUT_TOKENS, reply.usage.input_tokens);
    span.record(genai_attrs::GEN_AI_USAGE_OUTPUT_TOKENS, reply.usage.output_tokens);

    Ok(Json(ChatReply { reply: reply.text }))
}
