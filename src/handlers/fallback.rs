use crate::core::error::PortalError;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

pub async fn fallback_handler(uri: Uri) -> Response {
    let mut response = PortalError::InvalidParameter(format!(
        "Unknown endpoint {}. See /health and /sessions",
        uri.path()
    ))
    .into_response();

    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}
