use crate::core::error::PortalError;
use crate::core::state::AppState;
use crate::models::api::{SessionCreatedResponse, SessionSummary, SuccessResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Parse a session id taken from the URL
pub fn parse_session_id(raw: &str) -> Result<Uuid, PortalError> {
    Uuid::parse_str(raw)
        .map_err(|_| PortalError::InvalidParameter(format!("malformed session id '{}'", raw)))
}

/// Start a new logged-out session on the Home page
///
/// POST /sessions
pub async fn create_session_handler(State(state): State<Arc<AppState>>) -> Response {
    let id = state.sessions.create();

    debug!(session_id = %id, active_sessions = state.sessions.len(), "Session created");

    (
        StatusCode::CREATED,
        Json(SessionCreatedResponse {
            session_id: id.to_string(),
        }),
    )
        .into_response()
}

/// GET /sessions/{id}
pub async fn get_session_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let summary = state.sessions.with_session(id, |session| SessionSummary {
        session_id: id.to_string(),
        logged_in: session.is_logged_in(),
        current_user: session.current_user().map(str::to_string),
        active_page: session.current_page(),
        history_len: session.history().len(),
    })?;

    Ok((StatusCode::OK, Json(summary)).into_response())
}

/// Drop a session entirely
///
/// DELETE /sessions/{id}
pub async fn delete_session_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    state
        .sessions
        .remove(id)
        .ok_or_else(|| PortalError::SessionNotFound(id.to_string()))?;

    info!(session_id = %id, "Session closed");

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Session closed".to_string(),
        }),
    )
        .into_response())
}
