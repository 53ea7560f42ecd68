//! Résumé analysis: pluggable, trait-based backends sharing one output contract.
//!
//! `LiveAnalyzer` asks the reasoning service and normalizes its answer.
//! `HeuristicAnalyzer` works offline and never fails.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`, chosen once at startup from
//! the configured credential.

pub mod heuristic;
pub mod normalize;
pub mod prompts;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::PipelineError;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::models::profile::StructuredProfile;

pub use normalize::NormalizationAnomaly;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    Live,
    Heuristic,
}

impl AnalysisSource {
    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisSource::Live => "live",
            AnalysisSource::Heuristic => "heuristic",
        }
    }
}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub profile: StructuredProfile,
    pub anomalies: Vec<NormalizationAnomaly>,
    pub source: AnalysisSource,
}

/// The analyzer trait. Implementations carry no per-request state and are
/// shared across concurrent uploads.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    fn source(&self) -> AnalysisSource;

    async fn analyze(&self, resume_text: &str) -> Result<AnalysisOutcome, PipelineError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LiveAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct LiveAnalyzer {
    llm: Arc<dyn TextGenerator>,
}

impl LiveAnalyzer {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ResumeAnalyzer for LiveAnalyzer {
    fn source(&self) -> AnalysisSource {
        AnalysisSource::Live
    }

    async fn analyze(&self, resume_text: &str) -> Result<AnalysisOutcome, PipelineError> {
        let prompt = prompts::build_analysis_prompt(resume_text);
        let response = self.llm.generate(&prompt).await?;
        let normalized = normalize::normalize_response(&response, resume_text)?;

        Ok(AnalysisOutcome {
            profile: normalized.profile,
            anomalies: normalized.anomalies,
            source: AnalysisSource::Live,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicAnalyzer
// ────────────────────────────────────────────────────────────────────────────

pub struct HeuristicAnalyzer;

#[async_trait]
impl ResumeAnalyzer for HeuristicAnalyzer {
    fn source(&self) -> AnalysisSource {
        AnalysisSource::Heuristic
    }

    async fn analyze(&self, resume_text: &str) -> Result<AnalysisOutcome, PipelineError> {
        Ok(AnalysisOutcome {
            profile: heuristic::heuristic_profile(resume_text),
            anomalies: Vec::new(),
            source: AnalysisSource::Heuristic,
        })
    }
}

/// Picks the backend for the process lifetime.
pub fn select_analyzer(config: &Config) -> anyhow::Result<Arc<dyn ResumeAnalyzer>> {
    match config.gemini_credential() {
        Some(key) => {
            let llm = LlmClient::new(
                key.to_string(),
                config.gemini_api_base.clone(),
                Duration::from_secs(config.llm_timeout_secs),
            )?;
            info!("Resume analyzer: live (model: {})", crate::llm_client::MODEL);
            Ok(Arc::new(LiveAnalyzer::new(Arc::new(llm))))
        }
        None => {
            warn!("No valid GEMINI_API_KEY configured; using heuristic résumé analysis");
            Ok(Arc::new(HeuristicAnalyzer))
        }
    }
}
