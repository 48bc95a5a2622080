use std::{error::Error, fmt};

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Wire-level error: status code plus a human-readable message rendered in a
/// `{"message": ...}` envelope. Handlers interpolate the underlying failure
/// into the message, so no structured error codes exist.
#[derive(Debug)]
pub struct ApiError {
    pub code: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: String) -> Self {
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response<Body> {
        error!("{} response: {}", self.code, self.message);

        let body: Body = json!({ "message": self.message }).to_string().into();

        Response::builder()
            .status(self.code)
            .header("Content-Type", "application/json")
            .body(body)
            .expect("building response body should be infallible")
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ApiError {}
