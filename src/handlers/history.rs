use crate::core::error::PortalError;
use crate::core::state::AppState;
use crate::handlers::session::parse_session_id;
use crate::history::receipt::{receipt_file_name, to_csv};
use crate::models::api::HistoryResponse;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

fn csv_response(file_name: &str, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /sessions/{id}/history
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let history = state.sessions.with_authenticated(id, |session| {
        Ok(HistoryResponse {
            records: session.history().to_vec(),
            capacity: session.history().capacity(),
        })
    })?;

    Ok((StatusCode::OK, Json(history)).into_response())
}

/// Whole session history as CSV
///
/// GET /sessions/{id}/history.csv
pub async fn history_csv_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let body = state
        .sessions
        .with_authenticated(id, |session| Ok(to_csv(session.history().iter())))?;

    Ok(csv_response("claim_history.csv", body))
}

/// Receipt for the most recent prediction
///
/// GET /sessions/{id}/receipt.csv
pub async fn receipt_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let (file_name, body) = state.sessions.with_authenticated(id, |session| {
        let last = session.history().last().ok_or(PortalError::NoHistory)?;
        Ok((receipt_file_name(last), to_csv([last])))
    })?;

    Ok(csv_response(&file_name, body))
}
