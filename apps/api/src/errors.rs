use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The three request failures stay distinct so the user knows whether to
/// fill in the form, replace the PDF, or just try again.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    format!(
                        "Could not read the uploaded resume ({e}). \
                        Please upload a different, text-based PDF."
                    ),
                )
            }
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The cover letter could not be generated. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_per_failure_kind() {
        let cases = [
            (AppError::Validation("missing".into()), StatusCode::BAD_REQUEST),
            (
                AppError::PayloadTooLarge("too big".into()),
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                AppError::Extraction(ExtractionError::Empty),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::Generation(LlmError::NoChoices), StatusCode::BAD_GATEWAY),
            (
                AppError::Internal(anyhow::anyhow!("join failed")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_generation_message_hides_details() {
        let err = AppError::Generation(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided: sk-****".to_string(),
        });
        let (_, code, message) = err.parts();
        assert_eq!(code, "GENERATION_ERROR");
        assert!(!message.contains("sk-"));
        assert!(message.contains("try again"));
    }

    #[test]
    fn test_extraction_message_asks_for_new_upload() {
        let (_, code, message) = AppError::Extraction(ExtractionError::Encrypted).parts();
        assert_eq!(code, "EXTRACTION_ERROR");
        assert!(message.contains("encrypted"));
        assert!(message.contains("upload a different"));
    }
}
