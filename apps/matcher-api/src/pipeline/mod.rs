//! Match pipeline: text extraction, profile extraction, scoring, report.
//!
//! Nothing is retried, no partial result is returned, and the report is only written
//! once every earlier stage has succeeded. Each extraction stage runs the two documents
//! concurrently, then reports the CV's error before the job description's.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extraction::{ProfileExtractor, TextExtractor};
use crate::models::MatchResult;
use crate::report::{ReportArtifacts, Reporter};
use crate::scoring::{interpret, score_match};

#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub artifacts: ReportArtifacts,
}

#[derive(Clone)]
pub struct MatchPipeline {
    text_extractor: Arc<dyn TextExtractor>,
    profile_extractor: Arc<dyn ProfileExtractor>,
    reporter: Reporter,
}

impl MatchPipeline {
    pub fn new(
        text_extractor: Arc<dyn TextExtractor>,
        profile_extractor: Arc<dyn ProfileExtractor>,
        reporter: Reporter,
    ) -> Self {
        Self {
            text_extractor,
            profile_extractor,
            reporter,
        }
    }

    pub async fn run(&self, cv_path: &Path, job_path: &Path) -> Result<MatchOutcome, AppError> {
        info!(
            "Matching CV {} against job description {}",
            cv_path.display(),
            job_path.display()
        );

        let (cv_text, job_text) = tokio::join!(
            self.text_extractor.extract_text(cv_path),
            self.text_extractor.extract_text(job_path),
        );
        let (cv_text, job_text) = cv_first(cv_text, job_text).map_err(|e| {
            warn!("Text extraction failed: {e}");
            e
        })?;

        let (candidate, job) = tokio::join!(
            self.profile_extractor.extract_candidate(&cv_text),
            self.profile_extractor.extract_job(&job_text),
        );
        let (candidate, job) = cv_first(candidate, job).map_err(|e| {
            warn!("Structured extraction failed: {e}");
            e
        })?;

        let score_breakdown = score_match(&candidate, &job);
        info!(
            "Scored {}: total={} (skills {:.1}, education {:.1}, experience {:.1})",
            if candidate.name.is_empty() { "<unnamed>" } else { candidate.name.as_str() },
            score_breakdown.total_score,
            score_breakdown.skill_score,
            score_breakdown.education_score,
            score_breakdown.experience_score,
        );

        let result = MatchResult {
            interpretation: interpret(score_breakdown.total_score).to_string(),
            candidate,
            job,
            score_breakdown,
            timestamp: Utc::now(),
        };

        let reporter = self.reporter.clone();
        let snapshot = result.clone();
        let artifacts = tokio::task::spawn_blocking(move || reporter.write(&snapshot))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("report task failed: {e}")))??;

        Ok(MatchOutcome { result, artifacts })
    }
}

/// Pairs two stage results, surfacing the CV's error when both failed.
fn cv_first<A, B>(
    cv: Result<A, AppError>,
    job: Result<B, AppError>,
) -> Result<(A, B), AppError> {
    Ok((cv?, job?))
}
