use crate::core::error::PortalError;
use crate::core::state::AppState;
use crate::handlers::session::parse_session_id;
use crate::models::api::NavResponse;
use crate::navigation::controller::{Navigator, Page};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::debug;

fn navigate(
    state: &AppState,
    session_id: &str,
    step: impl FnOnce(&mut Navigator),
) -> Result<Response, PortalError> {
    let id = parse_session_id(session_id)?;

    let nav = state.sessions.update_authenticated(id, |session| {
        step(session.navigator_mut());
        Ok(NavResponse::from_navigator(session.navigator()))
    })?;

    debug!(session_id = %id, active_index = nav.active_index, "Navigation updated");

    Ok((StatusCode::OK, Json(nav)).into_response())
}

/// GET /sessions/{id}/nav
pub async fn nav_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let nav = state
        .sessions
        .with_authenticated(id, |session| Ok(NavResponse::from_navigator(session.navigator())))?;

    Ok((StatusCode::OK, Json(nav)).into_response())
}

/// POST /sessions/{id}/nav/next
pub async fn next_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    navigate(&state, &session_id, |nav| {
        nav.next();
    })
}

/// POST /sessions/{id}/nav/back
pub async fn back_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    navigate(&state, &session_id, |nav| {
        nav.back();
    })
}

/// POST /sessions/{id}/nav/goto/{page}
pub async fn goto_handler(
    State(state): State<Arc<AppState>>,
    Path((session_id, page)): Path<(String, String)>,
) -> Result<Response, PortalError> {
    let page = Page::parse(&page).ok_or(PortalError::UnknownPage(page))?;

    navigate(&state, &session_id, |nav| {
        nav.goto(page);
    })
}
