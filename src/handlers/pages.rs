// Page view rendering

use crate::core::error::PortalError;
use crate::core::state::AppState;
use crate::handlers::session::parse_session_id;
use crate::models::api::{PageView, SupportContact};
use crate::navigation::controller::Page;
use crate::validation::form::form_schema;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

const HOME_HEADLINE: &str = "Welcome to SafeClaim AI";
const HOME_TAGLINE: &str = "Check, submit, and monitor your vehicle insurance claims with ease.";
const EMPTY_HISTORY: &str = "No claims recorded yet.";

/// Render whichever page the session is currently on
///
/// GET /sessions/{id}/page
pub async fn page_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    let view = state.sessions.with_authenticated(id, |session| {
        let view = match session.current_page() {
            Page::Home => PageView::Home {
                username: session.current_user().unwrap_or_default().to_string(),
                headline: HOME_HEADLINE,
                tagline: HOME_TAGLINE,
                call_to_action: Page::Predict,
            },
            Page::Predict => PageView::Predict {
                available: state.predictor.is_available(),
                strategy: state.predictor.primary_name(),
                schema: form_schema(),
            },
            Page::Monitor => {
                let records = session.history().to_vec();
                let message = if records.is_empty() {
                    Some(EMPTY_HISTORY)
                } else {
                    None
                };
                PageView::Monitor { records, message }
            }
            Page::Support => PageView::Support {
                contact: SupportContact {
                    contact_name: state.config.support.contact_name.clone(),
                    phone: state.config.support.phone.clone(),
                    email: state.config.support.email.clone(),
                },
            },
        };
        Ok(view)
    })?;

    Ok((StatusCode::OK, Json(view)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::create_test_state;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use uuid::Uuid;

    async fn view_json(state: Arc<AppState>, id: Uuid) -> serde_json::Value {
        let response = page_handler(State(state), Path(id.to_string())).await.unwrap();
        let bytes = Body::new(response.into_body()).collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_on(state: &AppState, page: Page) -> Uuid {
        let id = state.sessions.create();
        state
            .sessions
            .update(id, |s| {
                s.login("admin");
                s.navigator_mut().goto(page);
                Ok(())
            })
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_home_view() {
        let state = create_test_state();
        let id = session_on(&state, Page::Home);

        let view = view_json(state, id).await;
        assert_eq!(view["page"], "home");
        assert_eq!(view["username"], "admin");
        assert_eq!(view["call_to_action"], "predict");
    }

    #[tokio::test]
    async fn test_predict_view_has_schema() {
        let state = create_test_state();
        let id = session_on(&state, Page::Predict);

        let view = view_json(state, id).await;
        assert_eq!(view["page"], "predict");
        assert_eq!(view["available"], true);
        assert_eq!(view["schema"]["fields"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_monitor_view_empty_message() {
        let state = create_test_state();
        let id = session_on(&state, Page::Monitor);

        let view = view_json(state, id).await;
        assert_eq!(view["page"], "monitor");
        assert_eq!(view["message"], EMPTY_HISTORY);
        assert!(view["records"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_support_view_uses_config() {
        let state = create_test_state();
        let id = session_on(&state, Page::Support);

        let view = view_json(state, id).await;
        assert_eq!(view["page"], "support");
        assert_eq!(view["contact"]["contact_name"], "Support Desk");
    }

    #[tokio::test]
    async fn test_page_requires_login() {
        let state = create_test_state();
        let id = state.sessions.create();

        let result = page_handler(State(state), Path(id.to_string())).await;
        assert!(matches!(result, Err(PortalError::NotLoggedIn)));
    }
}
