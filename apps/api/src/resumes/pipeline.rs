//! One upload, start to finish: extract → analyze → format.

use bytes::Bytes;
use tracing::info;

use crate::analysis::{AnalysisOutcome, ResumeAnalyzer};
use crate::errors::PipelineError;
use crate::extraction::extract_text;
use crate::models::resume::ResumeRecord;

pub struct ProcessedResume {
    pub outcome: AnalysisOutcome,
    pub record: ResumeRecord,
}

pub async fn process_upload(
    data: Bytes,
    filename: &str,
    analyzer: &dyn ResumeAnalyzer,
) -> Result<ProcessedResume, PipelineError> {
    let resume_text = tokio::task::spawn_blocking(move || extract_text(&data))
        .await
        .map_err(|e| PipelineError::Extraction(format!("PDF extraction task failed: {e}")))??;

    info!(
        "Extracted {} chars from {filename}; analyzing with {} backend",
        resume_text.len(),
        analyzer.source().as_str()
    );

    let outcome = analyzer.analyze(&resume_text).await?;
    debug_assert!(outcome.profile.rating_in_range());
    let record = ResumeRecord::from_profile(&outcome.profile, filename);

    Ok(ProcessedResume { outcome, record })
}
