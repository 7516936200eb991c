use crate::core::error::PortalError;
use crate::core::state::AppState;
use crate::handlers::session::parse_session_id;
use crate::models::api::{CredentialsRequest, SessionSummary, SuccessResponse};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Log a session in
///
/// POST /sessions/{id}/login
/// A failed attempt leaves the session untouched. A session that is already
/// logged in must log out before another login.
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;
    let Json(params) = payload?;

    // Unknown and live sessions fail before credentials are checked
    if state.sessions.with_session(id, |s| s.is_logged_in())? {
        return Err(PortalError::AlreadyLoggedIn);
    }

    if !state.credentials.verify(&params.username, &params.password) {
        state.metrics.record_login(false);
        warn!(session_id = %id, username = %params.username, "Failed login attempt");
        return Err(PortalError::InvalidCredentials);
    }

    let summary = state.sessions.update(id, |session| {
        // Another request may have logged this session in meanwhile
        if session.is_logged_in() {
            return Err(PortalError::AlreadyLoggedIn);
        }
        session.login(&params.username);
        Ok(SessionSummary {
            session_id: id.to_string(),
            logged_in: true,
            current_user: Some(params.username.clone()),
            active_page: session.current_page(),
            history_len: session.history().len(),
        })
    })?;

    state.metrics.record_login(true);
    info!(session_id = %id, username = %params.username, "User logged in");

    Ok((StatusCode::OK, Json(summary)).into_response())
}

/// Register (or overwrite) an account
///
/// POST /register
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Response, PortalError> {
    let Json(params) = payload?;
    let username = params.username.trim();

    if username.is_empty() || params.password.is_empty() {
        return Err(PortalError::InvalidParameter(
            "username and password must not be empty".to_string(),
        ));
    }

    if let Err(e) = state.credentials.put(username, &params.password) {
        error!(username = %username, error = %format!("{:#}", e), "Failed to persist account");
        return Err(PortalError::InternalError("failed to save account".to_string()));
    }

    state.metrics.increment_registrations();
    info!(username = %username, "Account registered");

    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse {
            success: true,
            message: "Account saved permanently! Please Login.".to_string(),
        }),
    )
        .into_response())
}

/// Log a session out, resetting it to its initial state
///
/// POST /sessions/{id}/logout
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let previous_user = state.sessions.update(id, |session| {
        let user = session.current_user().map(str::to_string);
        session.logout();
        Ok(user)
    })?;

    info!(session_id = %id, username = ?previous_user, "User logged out");

    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::{create_test_config, create_test_state};
    use crate::models::claim::{ClaimRecord, VehicleCategory};
    use crate::navigation::controller::Page;
    use crate::stores::file_credentials::FileCredentialStore;
    use crate::stores::credential_store::{CredentialStore, SEED_PASSWORD, SEED_USERNAME};

    fn credentials(username: &str, password: &str) -> Result<Json<CredentialsRequest>, JsonRejection> {
        Ok(Json(CredentialsRequest {
            username: username.to_string(),
            password: password.to_string(),
        }))
    }

    #[tokio::test]
    async fn test_login_with_seed_account() {
        let state = create_test_state();
        let id = state.sessions.create();

        let response = login_handler(
            State(state.clone()),
            Path(id.to_string()),
            credentials(SEED_USERNAME, SEED_PASSWORD),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (logged_in, user) = state
            .sessions
            .with_session(id, |s| (s.is_logged_in(), s.current_user().map(str::to_string)))
            .unwrap();
        assert!(logged_in);
        assert_eq!(user.as_deref(), Some(SEED_USERNAME));
    }

    #[tokio::test]
    async fn test_login_wrong_password_leaves_session_unchanged() {
        let state = create_test_state();
        let id = state.sessions.create();

        let result = login_handler(
            State(state.clone()),
            Path(id.to_string()),
            credentials(SEED_USERNAME, "nope"),
        )
        .await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        assert!(!state.sessions.with_session(id, |s| s.is_logged_in()).unwrap());
        assert_eq!(
            state.metrics.failed_logins.load(std::sync::atomic::Ordering::Relaxed),
            1
        );
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let state = create_test_state();
        let id = state.sessions.create();

        let response = register_handler(State(state.clone()), credentials("alice", "p1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = login_handler(State(state.clone()), Path(id.to_string()), credentials("alice", "p1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let state = create_test_state();

        let result = register_handler(State(state.clone()), credentials("   ", "p1")).await;
        assert!(matches!(result, Err(PortalError::InvalidParameter(_))));

        let result = register_handler(State(state), credentials("alice", "")).await;
        assert!(matches!(result, Err(PortalError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_logout_resets_session() {
        let state = create_test_state();
        let id = state.sessions.create();

        login_handler(
            State(state.clone()),
            Path(id.to_string()),
            credentials(SEED_USERNAME, SEED_PASSWORD),
        )
        .await
        .unwrap();
        state
            .sessions
            .update(id, |s| {
                s.navigator_mut().goto(Page::Monitor);
                Ok(())
            })
            .unwrap();

        let response = logout_handler(State(state.clone()), Path(id.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (logged_in, page) = state
            .sessions
            .with_session(id, |s| (s.is_logged_in(), s.current_page()))
            .unwrap();
        assert!(!logged_in);
        assert_eq!(page, Page::Home);
    }

    #[tokio::test]
    async fn test_login_on_live_session_is_rejected() {
        let state = create_test_state();
        let id = state.sessions.create();
        register_handler(State(state.clone()), credentials("bob", "pw")).await.unwrap();

        login_handler(
            State(state.clone()),
            Path(id.to_string()),
            credentials(SEED_USERNAME, SEED_PASSWORD),
        )
        .await
        .unwrap();
        state
            .sessions
            .update(id, |s| {
                s.record_claim(ClaimRecord::new("10:00".into(), VehicleCategory::Cars, 825.0).unwrap());
                Ok(())
            })
            .unwrap();

        let result = login_handler(State(state.clone()), Path(id.to_string()), credentials("bob", "pw")).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // The first user keeps the session, bob sees nothing of it
        let (user, history_len) = state
            .sessions
            .with_session(id, |s| (s.current_user().map(str::to_string), s.history().len()))
            .unwrap();
        assert_eq!(user.as_deref(), Some(SEED_USERNAME));
        assert_eq!(history_len, 1);

        logout_handler(State(state.clone()), Path(id.to_string())).await.unwrap();
        login_handler(State(state.clone()), Path(id.to_string()), credentials("bob", "pw"))
            .await
            .unwrap();

        let (user, history_len) = state
            .sessions
            .with_session(id, |s| (s.current_user().map(str::to_string), s.history().len()))
            .unwrap();
        assert_eq!(user.as_deref(), Some("bob"));
        assert_eq!(history_len, 0);
    }

    #[tokio::test]
    async fn test_register_with_unreadable_store_keeps_accounts() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("user_data.json");
        let store = FileCredentialStore::new(path.clone());
        store.put("alice", "p1").unwrap();

        // Hand-edited into something that no longer parses
        let mut damaged = std::fs::read(&path).unwrap();
        damaged.truncate(damaged.len() / 2);
        std::fs::write(&path, &damaged).unwrap();

        let state = Arc::new(AppState::with_credentials(
            create_test_config(),
            Arc::new(store),
            None,
        ));

        let result = register_handler(State(state.clone()), credentials("carol", "p3")).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(std::fs::read(&path).unwrap(), damaged);
        assert_eq!(
            state.metrics.registrations.load(std::sync::atomic::Ordering::Relaxed),
            0
        );
    }

    #[tokio::test]
    async fn test_login_unknown_session() {
        let state = create_test_state();

        let result = login_handler(
            State(state),
            Path(uuid::Uuid::new_v4().to_string()),
            credentials(SEED_USERNAME, SEED_PASSWORD),
        )
        .await;
        assert!(matches!(result, Err(PortalError::SessionNotFound(_))));
    }
}
