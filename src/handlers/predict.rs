use crate::core::error::{PortalError, PredictionError};
use crate::core::state::AppState;
use crate::handlers::session::parse_session_id;
use crate::models::api::PredictionResponse;
use crate::models::claim::ClaimRecord;
use crate::utils::time::clock_hhmm;
use crate::validation::form::{form_schema, RawClaimForm};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Field list for the claim form
///
/// GET /form/schema
pub async fn form_schema_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(form_schema()))
}

/// Validate a claim form, estimate the amount and append it to the
/// session's history
///
/// POST /sessions/{id}/predict
pub async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    payload: Result<Json<RawClaimForm>, JsonRejection>,
) -> Result<Response, PortalError> {
    let id = parse_session_id(&session_id)?;

    if !state.sessions.with_session(id, |s| s.is_logged_in())? {
        return Err(PortalError::NotLoggedIn);
    }

    let Json(form) = payload.map_err(|rejection| {
        warn!(session_id = %id, error = %rejection.body_text(), "Claim form body rejected");
        PortalError::from(rejection)
    })?;

    let input = form.validate().map_err(|e| {
        warn!(session_id = %id, error = %e, "Claim form rejected");
        e
    })?;

    let estimate = match state.predictor.estimate(&input) {
        Ok(estimate) => estimate,
        Err(e) => {
            state.metrics.record_prediction(false, false);
            match &e {
                PredictionError::SchemaMismatch(detail) => {
                    error!(session_id = %id, detail = %detail, "Feature alignment failed");
                }
                PredictionError::InvalidEstimate(detail) => {
                    error!(session_id = %id, detail = %detail, "Estimate rejected");
                }
                PredictionError::ModelUnavailable => {
                    warn!(session_id = %id, "Prediction requested while model unavailable");
                }
            }
            return Err(e.into());
        }
    };

    let record = ClaimRecord::new(clock_hhmm(), input.vehicle_category, estimate.amount)
        .ok_or_else(|| {
            PredictionError::InvalidEstimate(format!("cannot display {}", estimate.amount))
        })?;

    state.sessions.update_authenticated(id, |session| {
        session.record_claim(record.clone());
        Ok(())
    })?;

    state.metrics.record_prediction(true, estimate.fell_back);

    info!(
        session_id = %id,
        vehicle = %input.vehicle_category,
        amount = estimate.amount,
        strategy = estimate.strategy,
        fell_back = estimate.fell_back,
        "Claim predicted"
    );

    Ok((
        StatusCode::OK,
        Json(PredictionResponse {
            amount: estimate.amount,
            display_amount: record.display_amount.clone(),
            strategy: estimate.strategy.to_string(),
            fell_back: estimate.fell_back,
            record,
        }),
    )
        .into_response())
}
