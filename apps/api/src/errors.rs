use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

pub const MISSING_API_KEY: &str = "Please enter your OpenAI API key.";
pub const MISSING_KEYWORDS: &str = "Please enter initial keywords.";
pub const MISSING_RULES: &str = "Please make sure rules.txt exists and is not empty.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Input errors never reach the completion API; `Llm` is the only variant a
/// caller may sensibly retry.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    MissingInput(&'static str),

    #[error("{}", MISSING_RULES)]
    MissingRules,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("An error occurred: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Llm(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::MissingInput(_) => (StatusCode::BAD_REQUEST, "MISSING_INPUT"),
            AppError::MissingRules => (StatusCode::BAD_REQUEST, "MISSING_RULES"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Llm(e) => {
                tracing::error!("Completion call failed: {e}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let message = match &self {
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
                "retryable": self.is_retryable()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_message_carries_cause() {
        let err = AppError::from(LlmError::Api {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "An error occurred: API error (status 401): Incorrect API key provided"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn test_input_errors_are_not_retryable() {
        assert!(!AppError::MissingInput(MISSING_KEYWORDS).is_retryable());
        assert!(!AppError::MissingRules.is_retryable());
        assert_eq!(AppError::MissingRules.to_string(), MISSING_RULES);
    }

    #[test]
    fn test_status_codes() {
        let missing = AppError::MissingInput(MISSING_API_KEY).into_response();
        assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

        let call = AppError::Llm(LlmError::EmptyContent).into_response();
        assert_eq!(call.status(), StatusCode::BAD_GATEWAY);

        let absent = AppError::NotFound("session".to_string()).into_response();
        assert_eq!(absent.status(), StatusCode::NOT_FOUND);
    }
}
