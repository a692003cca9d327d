use std::sync::Arc;

use crate::config::Config;
use crate::pipeline::MatchPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Extraction backends are swapped here (real PDF + Gemini in `main`, fakes in tests).
    pub pipeline: Arc<MatchPipeline>,
}
