use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;
use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    /// Live or heuristic backend, fixed at startup from the configured credential.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    pub config: Config,
}
