// HTTP routes configuration

use crate::core::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Public endpoints
        .route("/health", get(crate::handlers::health::health_handler))
        .route("/register", post(crate::handlers::auth::register_handler))
        .route("/form/schema", get(crate::handlers::predict::form_schema_handler))

        // Session lifecycle
        .route("/sessions", post(crate::handlers::session::create_session_handler))
        .route(
            "/sessions/{id}",
            get(crate::handlers::session::get_session_handler)
                .delete(crate::handlers::session::delete_session_handler),
        )
        .route("/sessions/{id}/login", post(crate::handlers::auth::login_handler))
        .route("/sessions/{id}/logout", post(crate::handlers::auth::logout_handler))

        // Navigation (requires login)
        .route("/sessions/{id}/nav", get(crate::handlers::navigation::nav_handler))
        .route("/sessions/{id}/nav/next", post(crate::handlers::navigation::next_handler))
        .route("/sessions/{id}/nav/back", post(crate::handlers::navigation::back_handler))
        .route("/sessions/{id}/nav/goto/{page}", post(crate::handlers::navigation::goto_handler))
        .route("/sessions/{id}/page", get(crate::handlers::pages::page_handler))

        // Prediction and history (requires login)
        .route("/sessions/{id}/predict", post(crate::handlers::predict::predict_handler))
        .route("/sessions/{id}/history", get(crate::handlers::history::history_handler))
        .route("/sessions/{id}/history.csv", get(crate::handlers::history::history_csv_handler))
        .route("/sessions/{id}/receipt.csv", get(crate::handlers::history::receipt_handler))

        // Admin endpoints (require API key)
        .route("/metrics", get(crate::handlers::metrics::metrics_handler))

        // 404 fallback for all unmatched routes
        .fallback(crate::handlers::fallback::fallback_handler)

        .with_state(state)
}
