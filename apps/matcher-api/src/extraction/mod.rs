//! Capability seams between the pipeline and the outside world.
//!
//! `TextExtractor` turns an uploaded document into plain text; `ProfileExtractor`
//! turns that text into a structured profile. Production implementations wrap
//! `pdf-extract` and the Gemini client; tests substitute deterministic fakes.

use std::path::Path;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{CandidateProfile, JobProfile};

pub mod pdf;
pub mod profile;
pub mod prompts;

pub use pdf::PdfTextExtractor;
pub use profile::LlmProfileExtractor;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Returns the concatenated text of every page. Empty text is an error.
    async fn extract_text(&self, path: &Path) -> Result<String, AppError>;
}

#[async_trait]
pub trait ProfileExtractor: Send + Sync {
    async fn extract_candidate(&self, cv_text: &str) -> Result<CandidateProfile, AppError>;

    async fn extract_job(&self, job_text: &str) -> Result<JobProfile, AppError>;
}
