//! Application error type mapping to HTTP status codes and envelope format.

use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use floodwise_types::error::{PredictionError, WizardError};

use crate::http::response::ApiMeta;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Wizard misuse or invalid step values.
    Wizard(WizardError),
    /// Prediction failures.
    Prediction(PredictionError),
    /// No session with the given id.
    SessionNotFound(String),
    /// Malformed request input.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Wizard(e)
    }
}

impl From<PredictionError> for AppError {
    fn from(e: PredictionError) -> Self {
        AppError::Prediction(e)
    }
}

impl AppError {
    /// Status code and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Wizard(WizardError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION")
            }
            AppError::Wizard(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Prediction(PredictionError::ModelUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "MODEL_UNAVAILABLE")
            }
            AppError::Prediction(PredictionError::MissingFeature(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MISSING_FEATURE")
            }
            AppError::Prediction(PredictionError::Inference(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_ERROR")
            }
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Human-readable message for the envelope.
    pub fn message(&self) -> String {
        match self {
            AppError::Wizard(e) => e.to_string(),
            AppError::Prediction(e) => e.to_string(),
            AppError::SessionNotFound(id) => format!("Session '{id}' not found"),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = json!({
            "data": null,
            "meta": ApiMeta::since(Instant::now()),
            "errors": [{ "code": code, "message": message }],
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodwise_types::schema::Feature;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::Wizard(WizardError::InvalidTransition {
                    action: "back",
                    phase: "editing(0)".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Wizard(WizardError::OutOfRange {
                    feature: Feature::Landslides,
                    value: 12.0,
                }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Prediction(PredictionError::ModelUnavailable("gone".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Prediction(PredictionError::MissingFeature(Feature::Watersheds)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::SessionNotFound("x".to_string()),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_and_code().0, status);
        }
    }

    #[test]
    fn test_into_response_status() {
        let resp = AppError::Prediction(PredictionError::Inference("boom".to_string())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
