// Metrics endpoint

use crate::core::error::MonitoringError;
use crate::core::state::AppState;
use crate::models::api::ApiKeyQuery;
use crate::utils::auth::verify_api_key;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Returns JSON with portal statistics: login and prediction counters,
/// registrations, active sessions and uptime.
///
/// Requires the admin API key.
pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ApiKeyQuery>,
) -> Result<Response, MonitoringError> {
    if !verify_api_key(&params.api_key, &state.config.admin.api_key) {
        warn!("Unauthorized metrics access attempt");
        return Err(MonitoringError::InvalidApiKey);
    }

    let snapshot = state.metrics.get_snapshot(&state.sessions);

    Ok((StatusCode::OK, Json(snapshot)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::test_support::{create_test_state, TEST_API_KEY};
    use crate::metrics::collector::MetricsSnapshot;
    use axum::body::Body;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_metrics_handler_success() {
        let state = create_test_state();

        let params = ApiKeyQuery {
            api_key: TEST_API_KEY.to_string(),
        };

        let response = metrics_handler(State(state), Query(params)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, StatusCode::OK);

        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let snapshot: MetricsSnapshot = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(snapshot.successful_logins, 0);
        assert_eq!(snapshot.active_sessions, 0);
        assert!(snapshot.uptime_seconds >= 0);
    }

    #[tokio::test]
    async fn test_metrics_handler_invalid_api_key() {
        let state = create_test_state();

        let params = ApiKeyQuery {
            api_key: "wrong-key".to_string(),
        };

        let result = metrics_handler(State(state), Query(params)).await;
        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_metrics_handler_with_data() {
        let state = create_test_state();

        state.sessions.create();
        state.metrics.record_login(true);
        state.metrics.record_prediction(true, false);

        let params = ApiKeyQuery {
            api_key: TEST_API_KEY.to_string(),
        };

        let response = metrics_handler(State(state), Query(params)).await.unwrap();

        let (_, body) = response.into_parts();
        let bytes = Body::new(body).collect().await.unwrap().to_bytes();
        let snapshot: MetricsSnapshot = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(snapshot.successful_logins, 1);
        assert_eq!(snapshot.successful_predictions, 1);
        assert_eq!(snapshot.active_sessions, 1);
    }
}
