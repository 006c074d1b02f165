//! Session history HTTP handlers.
//!
//! Endpoints:
//! - GET    /api/v1/sessions                - List the caller's sessions (paginated)
//! - POST   /api/v1/sessions                - Create a session
//! - GET    /api/v1/sessions/{id}           - Get a session with its messages
//! - PUT    /api/v1/sessions/{id}/title     - Rename a session
//! - DELETE /api/v1/sessions/{id}           - Delete a session and its messages
//! - POST   /api/v1/sessions/{id}/messages  - Append a message to a session
//!
//! Every handler requires a verified identity and only ever touches
//! sessions owned by `claims.sub`.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use careerguide_types::chat::{MessageRole, SessionWithMessages};
use careerguide_types::page::{Page, PageMeta, PageRequest};

use crate::http::error::AppError;
use crate::http::extractors::auth::Identity;
use crate::http::extractors::query::SessionListQuery;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Request body for creating a session.
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// Optional starting title. Blank or missing falls back to the default.
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for renaming a session.
#[derive(Debug, Deserialize)]
pub struct UpdateSessionRequest {
    pub title: String,
}

/// Request body for appending a message.
#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: MessageRole,
    pub content: String,
}

/// Payload for the session list: one page of sessions plus the
/// navigation metadata clients page through.
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionWithMessages>,
    pub pagination: PageMeta,
}

impl From<Page<SessionWithMessages>> for SessionListResponse {
    fn from(page: Page<SessionWithMessages>) -> Self {
        Self {
            sessions: page.items,
            pagination: page.meta,
        }
    }
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

/// GET /api/v1/sessions - List the caller's sessions, most recent first.
pub async fn list_sessions(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Query(query): Query<SessionListQuery>,
) -> Result<Json<ApiResponse<SessionListResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let pagination = &state.config.pagination;
    let request = PageRequest::new(
        query.page.unwrap_or(1),
        query.limit.unwrap_or(pagination.default_page_size),
        pagination.max_page_size,
    );

    let page = state
        .chat_service
        .list_sessions(&claims.sub, request)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(SessionListResponse::from(page), request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions?page={}", request.page));

    Ok(Json(resp))
}

/// POST /api/v1/sessions - Create a session for the caller.
pub async fn create_session(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<ApiResponse<SessionWithMessages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let created = state
        .chat_service
        .create_session(&claims.profile(), body.title)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let self_link = format!("/api/v1/sessions/{}", created.session.id);
    let resp = ApiResponse::success(created, request_id, elapsed).with_link("self", &self_link);

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id} - Get a session with its full message list.
pub async fn get_session(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<SessionWithMessages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let session = state
        .chat_service
        .get_session(&claims.sub, &sid)
        .await?
        .ok_or(AppError::NotFound)?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}

/// PUT /api/v1/sessions/{id} - Rename a session.
pub async fn update_session_title(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(session_id): Path<String>,
    Json(body): Json<UpdateSessionRequest>,
) -> Result<Json<ApiResponse<SessionWithMessages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let title = body.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let updated = state
        .chat_service
        .update_session_title(&claims.sub, &sid, title)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(updated, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}

/// DELETE /api/v1/sessions/{id} - Delete a session and all of its messages.
pub async fn delete_session(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    state.chat_service.delete_session(&claims.sub, &sid).await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(
        serde_json::json!({"deleted": true, "session_id": sid}),
        request_id,
        elapsed,
    )
    .with_link("sessions", "/api/v1/sessions");

    Ok(Json(resp))
}

/// POST /api/v1/sessions/{id}/messages - Append a message to a session.
///
/// Clients record both sides of a conversation turn here after calling
/// the chat endpoint, which itself never writes history.
pub async fn append_message(
    State(state): State<AppState>,
    Identity(claims): Identity,
    Path(session_id): Path<String>,
    Json(body): Json<AppendMessageRequest>,
) -> Result<Json<ApiResponse<SessionWithMessages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;

    let content = body.content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("Message content is required".to_string()));
    }

    let updated = state
        .chat_service
        .append_message(&claims.sub, &sid, body.role, content)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;

    let resp = ApiResponse::success(updated, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{sid}"));

    Ok(Json(resp))
}
