//! Axum route handlers for the Resume API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::analysis::{AnalysisSource, NormalizationAnomaly};
use crate::errors::AppError;
use crate::models::profile::StructuredProfile;
use crate::models::resume::ResumeListItem;
use crate::resumes::pipeline::process_upload;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub resume_id: i64,
    pub analysis_source: AnalysisSource,
    pub anomalies: Vec<NormalizationAnomaly>,
    pub analysis: StructuredProfile,
}

#[derive(Debug, Serialize)]
pub struct ResumeDetailResponse {
    pub id: i64,
    pub filename: String,
    pub upload_date: DateTime<Utc>,
    pub profile: StructuredProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

struct UploadedPdf {
    filename: String,
    data: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes
///
/// Multipart upload (field `file`). Extracts, analyzes and stores one résumé.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let upload = read_pdf_field(multipart).await?;

    let processed = process_upload(upload.data, &upload.filename, state.analyzer.as_ref()).await?;
    let resume_id = state
        .store
        .insert(&processed.record)
        .await
        .map_err(AppError::Internal)?;

    info!(
        "Resume {resume_id} analyzed ({}, {} anomalies)",
        processed.outcome.source.as_str(),
        processed.outcome.anomalies.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Resume uploaded and analyzed successfully".to_string(),
            resume_id,
            analysis_source: processed.outcome.source,
            anomalies: processed.outcome.anomalies,
            analysis: processed.outcome.profile,
        }),
    ))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeListItem>>, AppError> {
    let items = state.store.list().await.map_err(AppError::Internal)?;
    Ok(Json(items))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ResumeDetailResponse>, AppError> {
    let row = state
        .store
        .get(id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    Ok(Json(ResumeDetailResponse {
        id: row.id,
        filename: row.filename.clone(),
        upload_date: row.upload_date,
        profile: row.into_profile(),
    }))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let deleted = state.store.delete(id).await.map_err(AppError::Internal)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Resume {id} not found")));
    }
    Ok(Json(MessageResponse {
        message: "Resume deleted successfully".to_string(),
    }))
}

async fn read_pdf_field(mut multipart: Multipart) -> Result<UploadedPdf, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read form field", e))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_lowercase().ends_with(".pdf") {
            return Err(AppError::Validation(
                "Only PDF files are supported".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read file data", e))?;
        return Ok(UploadedPdf { filename, data });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

fn multipart_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: upload exceeds the size limit"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
