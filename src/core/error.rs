// Centralized error handling for the portal

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

/// Errors raised while checking a claim form submission
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Unknown {field} option: {value}")]
    UnknownOption { field: String, value: String },
}

/// Errors raised by the prediction pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Prediction model is unavailable")]
    ModelUnavailable,

    #[error("Feature schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Estimate out of representable range: {0}")]
    InvalidEstimate(String),
}

/// Errors returned by portal handlers
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Invalid Username or Password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session already logged in, log out first")]
    AlreadyLoggedIn,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Unknown page: {0}")]
    UnknownPage(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("No claims recorded yet")]
    NoHistory,

    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl PortalError {
    pub fn status(&self) -> StatusCode {
        match self {
            PortalError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            PortalError::NotLoggedIn => StatusCode::UNAUTHORIZED,
            PortalError::AlreadyLoggedIn => StatusCode::CONFLICT,
            PortalError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            PortalError::UnknownPage(_) => StatusCode::BAD_REQUEST,
            PortalError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            PortalError::InvalidApiKey => StatusCode::UNAUTHORIZED,
            PortalError::NoHistory => StatusCode::NOT_FOUND,
            PortalError::InvalidBody { status, .. } => *status,
            PortalError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PortalError::Prediction(PredictionError::ModelUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PortalError::Prediction(
                PredictionError::SchemaMismatch(_) | PredictionError::InvalidEstimate(_),
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            PortalError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for PortalError {
    fn from(err: anyhow::Error) -> Self {
        PortalError::InternalError(format!("{:#}", err))
    }
}

// Body extraction failures keep axum's status (400, 415 or 422) but use the
// portal's JSON error body
impl From<JsonRejection> for PortalError {
    fn from(rejection: JsonRejection) -> Self {
        PortalError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        use crate::models::api::ErrorResponse;

        let status = self.status();

        (
            status,
            Json(ErrorResponse {
                success: false,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[derive(Error, Debug)]
pub enum MonitoringError {
    #[error("Invalid API key")]
    InvalidApiKey,
}

impl IntoResponse for MonitoringError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MonitoringError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Unauthorized"),
        };

        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(PortalError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            PortalError::SessionNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PortalError::from(ValidationError::MissingField("gender".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PortalError::from(PredictionError::ModelUnavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            PortalError::from(PredictionError::SchemaMismatch("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            PortalError::from(PredictionError::InvalidEstimate("inf".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(PortalError::AlreadyLoggedIn.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = ValidationError::OutOfRange {
            field: "driver_age".into(),
            value: "17".into(),
            min: "18".into(),
            max: "100".into(),
        };
        assert_eq!(err.to_string(), "driver_age out of range: 17 not in [18, 100]");
        assert_eq!(PortalError::from(err.clone()).to_string(), err.to_string());
    }

    #[test]
    fn test_error_response_body_shape() {
        let response = PortalError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_invalid_body_keeps_rejection_status() {
        let err = PortalError::InvalidBody {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "Expected request with `Content-Type: application/json`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.to_string().starts_with("Invalid request body"));
    }
}
