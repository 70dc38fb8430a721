//! Request and response bodies for the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::classifier::LabelSet;

/// POST /predict body
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub text: String,
}

/// POST /predict response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub emotions: LabelSet,
}

/// GET / response
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub message: &'static str,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub labels: Vec<&'static str>,
    pub threshold: f32,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned from a handler, rendered as `{"error": ...}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
