use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Failures of the extraction-and-analysis pipeline. Every variant is fatal for
/// the upload that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Could not read PDF: {0}")]
    Extraction(String),

    #[error("No text could be extracted from the PDF")]
    EmptyDocument,

    #[error("Analysis service failed: {0}")]
    AnalysisService(#[from] LlmError),

    #[error("Analysis service returned malformed output: {reason}")]
    MalformedAnalysis {
        reason: String,
        raw_response: String,
    },
}

/// Characters of a malformed model response kept in error-level logs.
const RESPONSE_PREVIEW_CHARS: usize = 120;

fn response_preview(raw: &str) -> String {
    raw.chars().take(RESPONSE_PREVIEW_CHARS).collect()
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Pipeline(PipelineError::Extraction(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_PDF", msg.clone())
            }
            AppError::Pipeline(e @ PipelineError::EmptyDocument) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_DOCUMENT",
                format!("{e}. Scanned or image-only PDFs are not supported"),
            ),
            AppError::Pipeline(PipelineError::AnalysisService(e)) => {
                tracing::error!("Analysis service error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "ANALYSIS_SERVICE_ERROR",
                    "The analysis service is unavailable".to_string(),
                )
            }
            AppError::Pipeline(PipelineError::MalformedAnalysis {
                reason,
                raw_response,
            }) => {
                tracing::error!(
                    "Malformed analysis ({reason}); raw response ({} chars) starts: {:?}",
                    raw_response.chars().count(),
                    response_preview(raw_response)
                );
                tracing::debug!("Full malformed analysis response: {raw_response}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_ANALYSIS",
                    "The analysis service returned an unreadable result".to_string(),
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
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
