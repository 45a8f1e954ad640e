use std::sync::Arc;

use crate::config::Config;
use crate::job_posting::JobScraper;
use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. `GeminiClient` in production.
    pub llm: Arc<dyn CompletionProvider>,
    pub scraper: JobScraper,
    pub config: Config,
}
